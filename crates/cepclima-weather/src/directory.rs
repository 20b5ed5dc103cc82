//! Postal directory lookup: CEP to city name.
//! Uses ViaCEP - free, no API key required.

use cepclima_core::{error_body_text, CepError, ReqwestErrorExt};
use reqwest::Client;
use tracing::instrument;

use crate::types::{CityLookupResult, ViaCepResponse};

#[derive(Debug, Clone)]
pub struct PostalDirectory {
    client: Client,
    base_url: String,
}

impl PostalDirectory {
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look `cep` up once. `found` is false when the directory flags the code as unknown.
    ///
    /// Transport and decode failures come back as `CepError::Upstream`.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, cep: &str) -> Result<CityLookupResult, CepError> {
        let url = format!("{}/{}/json/", self.base_url, cep);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = error_body_text(response).await;
            tracing::debug!("Directory returned status {}", status);
            return Err(CepError::Upstream(format!("{}: {}", status, text)));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_upstream_error)?;

        let result = CityLookupResult::from(body);
        if result.found {
            tracing::info!("Resolved {} to {}", cep, result.city_name);
        } else {
            tracing::info!("Directory has no locality for {}", cep);
        }
        Ok(result)
    }
}
