use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use cepclima_core::Config;
use cepclima_weather::Resolver;
use tokio_util::sync::CancellationToken;

use crate::gateway::{gateway_router, GatewayState};
use crate::middleware::{apply_middleware, REQUEST_TIMEOUT};
use crate::resolver_api::resolver_router;
use crate::resolver_client::ResolverClient;
use crate::server::serve;

/// Gateway router with its middleware stack.
///
/// The resolver call gets its own deadline, and the request timeout is
/// stretched to outlast it so the resolver's answer is never cut off.
pub fn gateway_app(config: &Config) -> Result<Router> {
    let resolver_timeout = config.resolver_timeout();
    let resolver = ResolverClient::new(&config.gateway.resolver_url, resolver_timeout)
        .context("Failed to create resolver client")?;
    let router = gateway_router(GatewayState { resolver });
    let request_timeout =
        REQUEST_TIMEOUT.max(resolver_timeout.saturating_add(Duration::from_secs(1)));
    Ok(apply_middleware(router, "gateway", request_timeout))
}

/// Resolver router with its middleware stack.
pub fn resolver_app(config: &Config) -> Result<Router> {
    let resolver = Resolver::from_config(&config.upstream)
        .context("Failed to create upstream clients")?;
    let router = resolver_router(resolver);
    Ok(apply_middleware(router, "resolver", REQUEST_TIMEOUT))
}

pub async fn run_gateway(config: &Config, cancel: CancellationToken) -> Result<()> {
    tracing::info!(
        resolver_url = %config.gateway.resolver_url,
        resolver_timeout_secs = config.resolver_timeout().as_secs(),
        "Starting gateway service"
    );
    let app = gateway_app(config)?;
    serve(&config.gateway.listen_addr, app, cancel).await
}

pub async fn run_resolver(config: &Config, cancel: CancellationToken) -> Result<()> {
    tracing::info!(
        directory_url = %config.upstream.directory_url,
        weather_url = %config.upstream.weather_url,
        "Starting resolver service"
    );
    let app = resolver_app(config)?;
    serve(&config.resolver.listen_addr, app, cancel).await
}
