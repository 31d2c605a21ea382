//! Listener setup and the serve loop.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use ebx_core::error::{ExporterError, Result};

/// Bind the HTTP listener. Failure maps to `ExporterError::Bind`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ExporterError::Bind { addr: addr.to_string(), source })
}

/// Serve `app` until the process exits.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}
