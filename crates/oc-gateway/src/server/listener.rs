//! TCP listener for the gateway HTTP server

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::server::build_router;
use crate::state::GatewayState;

/// Gateway HTTP server
pub struct GatewayServer {
    state: GatewayState,
    /// Cancellation token for shutdown
    shutdown_token: Option<CancellationToken>,
}

impl GatewayServer {
    /// Create a new gateway server
    pub fn new(state: GatewayState) -> Self {
        Self {
            state,
            shutdown_token: None,
        }
    }

    /// Set the shutdown token (call before run)
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown_token = Some(token);
        self
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(self) -> Result<()> {
        let address = self.state.config().bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind gateway to {}", address))?;

        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener
            .local_addr()
            .context("Failed to read gateway listener address")?;
        tracing::info!("Gateway listening on {}", local_addr);

        let config = self.state.config();
        if !config.is_loopback_bind() && !config.auth.has_secret() {
            tracing::warn!(
                "Gateway is reachable from the network but no token or password is configured - \
                 remote pairing requests will be rejected"
            );
        }

        let app = build_router(self.state).into_make_service_with_connect_info::<SocketAddr>();
        let shutdown = self.shutdown_token.unwrap_or_default();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .context("Gateway server failed")?;

        tracing::info!("Gateway server stopped");
        Ok(())
    }
}
