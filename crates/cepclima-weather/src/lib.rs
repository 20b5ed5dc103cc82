//! Postal code to temperature resolution.
//!
//! Looks a CEP up in the ViaCEP postal directory, folds the city name to
//! ASCII and asks WeatherAPI for the current temperature.

pub mod directory;
pub mod normalize;
pub mod provider;
pub mod resolver;
pub mod types;

pub use directory::PostalDirectory;
pub use normalize::normalize_city;
pub use provider::WeatherProvider;
pub use resolver::Resolver;
pub use types::{CityLookupResult, WeatherReading};
