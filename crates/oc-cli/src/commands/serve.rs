//! Serve command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use super::config::load_gateway_config;
use oc_gateway::server::spawn_signal_handler;
use oc_gateway::{GatewayServer, GatewayState, ServeOverrides};

/// Run the gateway in the foreground until Ctrl+C or SIGTERM
pub async fn serve_command(config_path: Option<&PathBuf>, overrides: ServeOverrides) -> Result<()> {
    let mut config = load_gateway_config(config_path)?;
    overrides
        .apply(&mut config)
        .context("Invalid gateway configuration")?;

    tracing::info!("OpenClaw gateway starting...");

    let cancel = CancellationToken::new();
    spawn_signal_handler(cancel.clone());

    GatewayServer::new(GatewayState::new(config))
        .with_shutdown_token(cancel)
        .run()
        .await
}
