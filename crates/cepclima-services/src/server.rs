use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Bind `addr` and serve `router` until `cancel` fires.
pub async fn serve(addr: &str, router: Router, cancel: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve_listener(listener, router, cancel).await
}

/// Serve on an already bound listener. In-flight requests finish before returning.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let local_addr = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", local_addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server on {} shutting down gracefully", local_addr);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
