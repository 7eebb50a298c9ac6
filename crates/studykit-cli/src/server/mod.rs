//! HTTP server startup and graceful shutdown.

mod http_server;
mod lifecycle;
mod shutdown;

use std::io;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Serves `app` until a shutdown signal arrives.
///
/// `shutdown` is cancelled when the signal is received, which stops every
/// in-flight generation between model calls.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while
/// running.
pub async fn serve(app: Router, config: ServerConfig, shutdown: CancellationToken) -> io::Result<()> {
    http_server::serve_http(app, config, shutdown).await
}
