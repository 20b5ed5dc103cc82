use cepclima_core::{error_body_text, CepError, ReqwestErrorExt};
use reqwest::Client;
use tracing::instrument;

use crate::types::{CurrentResponse, ProviderErrorResponse, WeatherReading, NO_MATCHING_LOCATION};

/// WeatherAPI client for current conditions.
#[derive(Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherProvider {
    pub fn with_base_url(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch the current temperature for an already normalized, percent-encoded city.
    ///
    /// Only current conditions are requested (`aqi=no`).
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, encoded_city: &str) -> Result<WeatherReading, CepError> {
        let url = format!(
            "{}/current.json?key={}&aqi=no&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            encoded_city,
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = error_body_text(response).await;
            return Err(classify_failure(status.as_u16(), &text));
        }

        let body: CurrentResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_upstream_error)?;

        tracing::debug!("Current temperature {}°C", body.current.temp_c);
        Ok(WeatherReading {
            celsius: body.current.temp_c,
        })
    }
}

/// Map a non-success provider response to an outcome.
///
/// "No matching location" means there is no temperature for the city; the rest is upstream.
fn classify_failure(status: u16, body: &str) -> CepError {
    match serde_json::from_str::<ProviderErrorResponse>(body) {
        Ok(resp) if resp.error.code == NO_MATCHING_LOCATION => {
            tracing::info!("Weather provider: {}", resp.error.message);
            CepError::temperature_not_found()
        }
        Ok(resp) => CepError::Upstream(format!(
            "{} (code {}): {}",
            status, resp.error.code, resp.error.message
        )),
        Err(_) => CepError::Upstream(format!("{}: {}", status, body)),
    }
}
