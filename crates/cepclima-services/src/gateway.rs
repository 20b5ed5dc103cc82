//! Client-facing service: `POST /` with `{"cep": "..."}`.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use cepclima_core::cep::CepRequest;
use cepclima_core::TemperatureResponse;

use crate::error::ApiError;
use crate::resolver_client::ResolverClient;

#[derive(Debug, Clone)]
pub struct GatewayState {
    pub resolver: ResolverClient,
}

pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", post(temperature_by_cep))
        .with_state(state)
}

/// Validate the body and forward the code to the resolver.
///
/// The body is decoded here rather than through `Json` so that a
/// malformed body (400) stays distinct from an invalid code (422).
/// If the client goes away the future is dropped, and the in-flight
/// resolver call with it.
async fn temperature_by_cep(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<TemperatureResponse>, ApiError> {
    let query = CepRequest::from_slice(&body)?.into_query()?;

    let temperature = state
        .resolver
        .fetch(&query)
        .await
        .map_err(|e| e.context("failed to fetch temperature"))?;

    Ok(Json(temperature))
}
