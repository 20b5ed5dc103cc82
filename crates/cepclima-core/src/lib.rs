pub mod cep;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use cep::{is_valid_cep, PostalCodeQuery};
pub use config::{Config, GatewayConfig, ResolverConfig, UpstreamConfig, ValidationResult};
pub use error::{CepError, ClientInputError, ConfigError, ReqwestErrorExt};
pub use http::error_body_text;
pub use types::TemperatureResponse;

use anyhow::Result;

/// Initialize process-wide logging.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!("CepClima core initialized");
    Ok(())
}
