use serde::{Deserialize, Serialize};

/// Offset added to Celsius to get Kelvin.
///
/// Integer on purpose: response bodies have always carried `c + 273`.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Current temperature for a city in three units.
///
/// Built once by the resolver and forwarded unchanged by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    pub temp_c: f64,
    pub temp_f: f64,
    pub temp_k: f64,
    pub city: String,
}

impl TemperatureResponse {
    pub fn from_celsius(celsius: f64, city: impl Into<String>) -> Self {
        Self {
            temp_c: celsius,
            temp_f: celsius_to_fahrenheit(celsius),
            temp_k: celsius_to_kelvin(celsius),
            city: city.into(),
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}
