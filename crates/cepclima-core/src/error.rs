//! Error taxonomy shared by the gateway and the resolver.
//!
//! Every failure a request can hit lands in one of three buckets:
//! - client input problems (never retried, 4xx)
//! - lookups that found nothing (404)
//! - upstream failures talking to a dependency (500, original text preserved)

use thiserror::Error;

/// Problems with what the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientInputError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("missing required parameter: cep")]
    MissingCep,

    #[error("invalid zipcode")]
    InvalidCep,
}

impl ClientInputError {
    pub fn status_code(&self) -> u16 {
        match self {
            ClientInputError::MalformedRequest(_) | ClientInputError::MissingCep => 400,
            ClientInputError::InvalidCep => 422,
        }
    }
}

/// Outcome of a failed resolution, at any hop of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepError {
    #[error(transparent)]
    ClientInput(#[from] ClientInputError),

    /// Postal code unknown, or no temperature for the resolved city.
    #[error("{0}")]
    NotFound(String),

    /// Transport, timeout or decode failure against a dependency.
    #[error("{0}")]
    Upstream(String),
}

impl CepError {
    pub fn zipcode_not_found() -> Self {
        CepError::NotFound("can not find zipcode".to_string())
    }

    pub fn temperature_not_found() -> Self {
        CepError::NotFound("can not find temperature".to_string())
    }

    /// Prefix an upstream failure with the stage it happened in.
    ///
    /// Other variants pass through untouched.
    pub fn context(self, stage: &str) -> Self {
        match self {
            CepError::Upstream(detail) => CepError::Upstream(format!("{}: {}", stage, detail)),
            other => other,
        }
    }

    /// HTTP status the outcome maps to at either service boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            CepError::ClientInput(e) => e.status_code(),
            CepError::NotFound(_) => 404,
            CepError::Upstream(_) => 500,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_upstream_error(self) -> CepError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_upstream_error(self) -> CepError {
        if self.is_timeout() {
            CepError::Upstream(format!("request timed out: {}", self))
        } else if self.is_connect() {
            CepError::Upstream(format!("connection failed: {}", self))
        } else if self.is_decode() {
            CepError::Upstream(format!("invalid response: {}", self))
        } else if let Some(status) = self.status() {
            CepError::Upstream(format!("server error {}: {}", status.as_u16(), self))
        } else {
            CepError::Upstream(self.to_string())
        }
    }
}
