use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a summary of all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    /// External dependencies of the resolver
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the client-facing service binds to
    #[serde(default = "default_gateway_addr")]
    pub listen_addr: String,

    /// Base URL of the resolver service
    #[serde(default = "default_resolver_url")]
    pub resolver_url: String,

    /// Deadline for the whole resolver call. The resolver makes two
    /// sequential upstream calls, so when unset this is derived from
    /// `upstream.timeout_secs` (see [`Config::resolver_timeout`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver_timeout_secs: Option<u64>,
}

fn default_gateway_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_resolver_url() -> String {
    "http://localhost:8081".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_gateway_addr(),
            resolver_url: default_resolver_url(),
            resolver_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_resolver_addr")]
    pub listen_addr: String,
}

fn default_resolver_addr() -> String {
    "0.0.0.0:8081".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_resolver_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Postal directory base URL; the code goes in the path
    #[serde(default = "default_directory_url")]
    pub directory_url: String,

    /// Weather provider base URL
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Weather provider API key
    #[serde(default)]
    pub weather_api_key: String,

    /// Timeout applied to every outbound request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_directory_url() -> String {
    "https://viacep.com.br/ws".to_string()
}

fn default_weather_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            directory_url: default_directory_url(),
            weather_url: default_weather_url(),
            weather_api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sequential upstream calls made per resolver request.
const UPSTREAM_CALLS_PER_LOOKUP: u64 = 2;

/// Headroom on top of the upstream budget for the resolver hop itself.
const RESOLVER_MARGIN_SECS: u64 = 5;

impl Config {
    /// Deadline the gateway gives one resolver call.
    ///
    /// Defaults to twice the upstream timeout plus a margin so a chain where
    /// each upstream call finishes inside its own limit still fits.
    pub fn resolver_timeout(&self) -> Duration {
        let secs = self.gateway.resolver_timeout_secs.unwrap_or_else(|| {
            self.upstream
                .timeout_secs
                .saturating_mul(UPSTREAM_CALLS_PER_LOOKUP)
                .saturating_add(RESOLVER_MARGIN_SECS)
        });
        Duration::from_secs(secs)
    }

    /// Load configuration from an optional TOML file, then apply environment overrides.
    ///
    /// Without a path the defaults are used as the base.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Apply `CEPCLIMA_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CEPCLIMA_GATEWAY_ADDR") {
            self.gateway.listen_addr = v;
        }
        if let Some(v) = lookup("CEPCLIMA_RESOLVER_URL") {
            self.gateway.resolver_url = v;
        }
        if let Some(v) = lookup("CEPCLIMA_RESOLVER_TIMEOUT_SECS") {
            let secs = v.parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "CEPCLIMA_RESOLVER_TIMEOUT_SECS is not a number: {}",
                    v
                ))
            })?;
            self.gateway.resolver_timeout_secs = Some(secs);
        }
        if let Some(v) = lookup("CEPCLIMA_RESOLVER_ADDR") {
            self.resolver.listen_addr = v;
        }
        if let Some(v) = lookup("CEPCLIMA_DIRECTORY_URL") {
            self.upstream.directory_url = v;
        }
        if let Some(v) = lookup("CEPCLIMA_WEATHER_URL") {
            self.upstream.weather_url = v;
        }
        if let Some(v) = lookup("CEPCLIMA_WEATHER_API_KEY") {
            self.upstream.weather_api_key = v;
        }
        if let Some(v) = lookup("CEPCLIMA_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().map_err(|_| {
                ConfigError::Invalid(format!("CEPCLIMA_TIMEOUT_SECS is not a number: {}", v))
            })?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_addr(&self.gateway.listen_addr, "gateway.listen_addr", &mut result);
        validate_addr(&self.resolver.listen_addr, "resolver.listen_addr", &mut result);

        validate_url(&self.gateway.resolver_url, "gateway.resolver_url", &mut result);
        validate_url(
            &self.upstream.directory_url,
            "upstream.directory_url",
            &mut result,
        );
        validate_url(&self.upstream.weather_url, "upstream.weather_url", &mut result);

        if self.upstream.timeout_secs == 0 {
            result.add_error("upstream.timeout_secs", "Timeout must be greater than 0");
        } else if self.upstream.timeout_secs > 300 {
            result.add_warning(
                "upstream.timeout_secs",
                "Timeout is unusually large (>300 seconds)",
            );
        }

        let upstream_budget = self
            .upstream
            .timeout_secs
            .saturating_mul(UPSTREAM_CALLS_PER_LOOKUP);
        match self.gateway.resolver_timeout_secs {
            Some(0) => result.add_error(
                "gateway.resolver_timeout_secs",
                "Timeout must be greater than 0",
            ),
            Some(secs) if secs <= upstream_budget => result.add_warning(
                "gateway.resolver_timeout_secs",
                format!(
                    "Resolver timeout ({}s) does not exceed two upstream calls ({}s each); \
                     slow but successful lookups will fail at the gateway",
                    secs, self.upstream.timeout_secs
                ),
            ),
            _ => {}
        }

        if self.upstream.weather_api_key.trim().is_empty() {
            result.add_warning(
                "upstream.weather_api_key",
                "Weather API key not configured - temperature lookups will fail",
            );
        }

        result
    }
}

fn validate_addr(addr: &str, field_name: &str, result: &mut ValidationResult) {
    if let Err(e) = addr.parse::<SocketAddr>() {
        result.add_error(field_name, format!("Invalid listen address '{}': {}", addr, e));
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
