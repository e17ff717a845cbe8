//! Web server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::limit::RequestBodyLimitLayer;

use super::routes::{AppState, routes};
use crate::config::settings::Settings;
use crate::error::PrintCostError;

/// Build the router for the given settings.
pub fn build_router(settings: Settings) -> Router {
    let upload_limit = settings.upload_limit;
    let state = Arc::new(AppState::new(settings));

    routes()
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit))
        .with_state(state)
}

/// Web server instance
pub struct WebServer {
    settings: Settings,
}

impl WebServer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> crate::error::Result<SocketAddr> {
        format!("{}:{}", self.settings.bind, self.settings.port)
            .parse()
            .map_err(|e| {
                PrintCostError::config(format!(
                    "invalid bind address {}:{}: {e}",
                    self.settings.bind, self.settings.port
                ))
            })
    }

    /// Run the server until Ctrl+C.
    pub async fn run(&self) -> crate::error::Result<()> {
        let addr = self.socket_addr()?;
        let router = build_router(self.settings.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
