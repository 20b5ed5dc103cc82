use std::time::Duration;

use cepclima_core::{is_valid_cep, CepError, ClientInputError, TemperatureResponse, UpstreamConfig};
use reqwest::Client;
use tracing::instrument;

use crate::directory::PostalDirectory;
use crate::normalize::normalize_city;
use crate::provider::WeatherProvider;

/// CEP → city → current temperature, one attempt per hop.
#[derive(Debug, Clone)]
pub struct Resolver {
    directory: PostalDirectory,
    weather: WeatherProvider,
}

impl Resolver {
    pub fn new(directory: PostalDirectory, weather: WeatherProvider) -> Self {
        Self { directory, weather }
    }

    /// Build both upstream clients from configuration, sharing one connection pool.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, CepError> {
        let client = build_client(config.timeout())?;
        Ok(Self::new(
            PostalDirectory::with_base_url(client.clone(), &config.directory_url),
            WeatherProvider::with_base_url(client, &config.weather_url, &config.weather_api_key),
        ))
    }

    /// Resolve `cep` to the current temperature in its city.
    ///
    /// The code is validated again here. The weather provider is only queried
    /// after the directory reported a locality.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, cep: &str) -> Result<TemperatureResponse, CepError> {
        if !is_valid_cep(cep) {
            return Err(ClientInputError::InvalidCep.into());
        }

        let city = self
            .directory
            .lookup(cep)
            .await
            .map_err(|e| e.context("zipcode lookup failed"))?;

        if !city.found {
            return Err(CepError::zipcode_not_found());
        }

        let reading = self
            .weather
            .current(&normalize_city(&city.city_name))
            .await
            .map_err(|e| e.context("temperature lookup failed"))?;

        Ok(TemperatureResponse::from_celsius(reading.celsius, city.city_name))
    }
}

fn build_client(timeout: Duration) -> Result<Client, CepError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CepError::Upstream(format!("failed to build HTTP client: {}", e)))
}
