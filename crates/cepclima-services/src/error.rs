use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cepclima_core::{CepError, ClientInputError};

/// `CepError` rendered as a plain-text HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CepError);

impl From<CepError> for ApiError {
    fn from(err: CepError) -> Self {
        Self(err)
    }
}

impl From<ClientInputError> for ApiError {
    fn from(err: ClientInputError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "{}", self.0);
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self.0);
        }

        (status, self.0.to_string()).into_response()
    }
}
