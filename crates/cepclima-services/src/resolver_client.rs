//! Gateway side of the gateway → resolver hop.

use std::time::Duration;

use cepclima_core::{
    error_body_text, CepError, PostalCodeQuery, ReqwestErrorExt, TemperatureResponse,
};
use reqwest::{Client, StatusCode};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
    base_url: String,
}

impl ResolverClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CepError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CepError::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the resolver for the temperature at `query`.
    ///
    /// A 404 from the resolver is a terminal not-found carrying the resolver's
    /// message; any other failure, including an unexpected status, is upstream
    /// and keeps its text.
    #[instrument(skip(self, query), fields(cep = %query), level = "info")]
    pub async fn fetch(&self, query: &PostalCodeQuery) -> Result<TemperatureResponse, CepError> {
        let url = format!("{}/?cep={}", self.base_url, query.code());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_upstream_error)?;

        match response.status() {
            StatusCode::OK => response
                .json::<TemperatureResponse>()
                .await
                .map_err(ReqwestErrorExt::into_upstream_error),
            StatusCode::NOT_FOUND => {
                let text = error_body_text(response).await;
                let text = text.trim();
                if text.is_empty() {
                    Err(CepError::zipcode_not_found())
                } else {
                    Err(CepError::NotFound(text.to_string()))
                }
            }
            status => {
                let text = error_body_text(response).await;
                Err(CepError::Upstream(format!("{}: {}", status, text)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(code: &str) -> PostalCodeQuery {
        PostalCodeQuery::parse(code).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("cep", "01001000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temp_c": 22.5, "temp_f": 72.5, "temp_k": 295.5, "city": "São Paulo"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let resp = client.fetch(&query("01001000")).await.unwrap();

        assert_eq!(resp, TemperatureResponse::from_celsius(22.5, "São Paulo"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_forwards_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("can not find temperature"))
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.fetch(&query("12345678")).await.unwrap_err();

        assert_eq!(err, CepError::temperature_not_found());
    }

    #[tokio::test]
    async fn test_fetch_bare_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.fetch(&query("99999999")).await.unwrap_err();

        assert_eq!(err, CepError::zipcode_not_found());
    }

    #[tokio::test]
    async fn test_fetch_server_error_keeps_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("temperature lookup failed: timeout"),
            )
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.fetch(&query("01001000")).await.unwrap_err();

        assert!(matches!(err, CepError::Upstream(_)));
        assert!(err.to_string().contains("temperature lookup failed: timeout"));
    }

    #[tokio::test]
    async fn test_fetch_bad_json_is_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"temp_c\":"))
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.fetch(&query("01001000")).await.unwrap_err();

        assert!(matches!(err, CepError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client = ResolverClient::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.fetch(&query("01001000")).await.unwrap_err();

        assert!(matches!(err, CepError::Upstream(_)));
        assert!(err.to_string().contains("timed out"), "got: {}", err);
    }
}
