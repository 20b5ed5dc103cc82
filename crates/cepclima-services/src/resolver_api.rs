//! Internal service: `GET /?cep=...`.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use cepclima_core::TemperatureResponse;
use cepclima_weather::Resolver;

use crate::error::ApiError;

pub fn resolver_router(resolver: Resolver) -> Router {
    Router::new()
        .route("/", get(resolve_cep))
        .with_state(resolver)
}

/// Raw pairs so that no query string, however odd, is rejected before
/// validation. The first `cep` wins; absent means empty.
async fn resolve_cep(
    State(resolver): State<Resolver>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    let cep = params
        .iter()
        .find(|(key, _)| key == "cep")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    let temperature = resolver.resolve(cep).await?;
    Ok(Json(temperature))
}
