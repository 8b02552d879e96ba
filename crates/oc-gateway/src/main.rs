//! OpenClaw Gateway Daemon
//!
//! Serves device pairing payloads to local callers and to remote callers
//! holding the gateway secret.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oc_core::config::{self, GatewayConfig};
use oc_gateway::server::spawn_signal_handler;
use oc_gateway::{GatewayServer, GatewayState, ServeOverrides};

#[derive(Parser)]
#[command(name = "oc-gateway")]
#[command(about = "OpenClaw gateway daemon")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind host (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Gateway token (overrides config)
    #[arg(long, env = "OPENCLAW_GATEWAY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Gateway password (overrides config)
    #[arg(long, env = "OPENCLAW_GATEWAY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("OpenClaw gateway starting...");

    let mut config: GatewayConfig = if let Some(config_path) = &args.config {
        config::load_config(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        let default_path = config::default_config_path();
        if default_path.exists() {
            config::load_config(&default_path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
                GatewayConfig::default()
            })
        } else {
            tracing::info!("Using default configuration");
            GatewayConfig::default()
        }
    };

    ServeOverrides {
        bind: args.bind,
        port: args.port,
        token: args.token,
        password: args.password,
    }
    .apply(&mut config)
    .context("Invalid gateway configuration")?;

    let cancel = CancellationToken::new();
    spawn_signal_handler(cancel.clone());

    GatewayServer::new(GatewayState::new(config))
        .with_shutdown_token(cancel)
        .run()
        .await?;

    tracing::info!("Gateway shutdown complete");
    Ok(())
}
