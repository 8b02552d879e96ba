//! OpenClaw CLI
//!
//! Single binary for the gateway:
//! - `serve` runs the pairing gateway
//! - `pair` prints the pairing link and QR code for this machine
//! - `config` and `token` manage the config file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oc_gateway::ServeOverrides;
use openclaw::commands;

#[derive(Parser)]
#[command(name = "openclaw")]
#[command(author, version, about = "OpenClaw gateway pairing and management")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway in the foreground
    Serve {
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
    },

    /// Print the pairing link and QR code for this machine
    Pair {
        /// Also write the QR code as a PNG file
        #[arg(long, value_name = "FILE")]
        qr_out: Option<PathBuf>,
        /// Skip the terminal QR code
        #[arg(long)]
        no_qr: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage the gateway token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Create a config file with a generated token
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show current configuration (secrets redacted)
    Show,
    /// Show config file path
    Path,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Generate and store a new gateway token
    Rotate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    // serve is a daemon; it logs at info unless told otherwise
    let log_level = match (&cli.command, cli.quiet, cli.verbose) {
        (Commands::Serve { .. }, false, 0) => "info",
        _ => log_level,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = cli.config.as_ref();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            token,
            password,
        } => {
            let overrides = ServeOverrides {
                bind,
                port,
                token,
                password,
            };
            commands::serve_command(config_path, overrides).await?;
        }

        Commands::Pair { qr_out, no_qr } => {
            commands::pair_command(config_path, qr_out.as_deref(), !no_qr)?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config_init(config_path, force)?,
            ConfigAction::Show => commands::config_show(config_path)?,
            ConfigAction::Path => commands::config_path(config_path)?,
        },

        Commands::Token { action } => match action {
            TokenAction::Rotate => commands::token_rotate(config_path)?,
        },
    }

    Ok(())
}
