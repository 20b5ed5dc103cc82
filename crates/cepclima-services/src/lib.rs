//! HTTP surfaces for the gateway and resolver services.

pub mod app;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod resolver_api;
pub mod resolver_client;
pub mod server;

pub use app::{gateway_app, resolver_app, run_gateway, run_resolver};
pub use error::ApiError;
pub use gateway::{gateway_router, GatewayState};
pub use resolver_api::resolver_router;
pub use resolver_client::ResolverClient;
pub use server::{serve, serve_listener};
