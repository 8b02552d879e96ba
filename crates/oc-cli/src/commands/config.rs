//! Config command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::output::{format_config, print_error, print_info, print_success, print_warning};
use oc_core::auth::{generate_token, AuthConfig};
use oc_core::config::{self, GatewayConfig};

/// The config file to use: the `--config` argument or the default location
pub fn resolve_config_path(config_path: Option<&PathBuf>) -> PathBuf {
    config_path
        .cloned()
        .unwrap_or_else(config::default_config_path)
}

/// Load the gateway config, falling back to defaults when the file is missing
pub fn load_gateway_config(config_path: Option<&PathBuf>) -> Result<GatewayConfig> {
    let path = resolve_config_path(config_path);
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(GatewayConfig::default());
    }

    config::load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}

/// Show current configuration with secrets redacted
pub fn config_show(config_path: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(config_path);

    if !path.exists() {
        print_warning(&format!("No configuration file found at {:?}", path));
        print_info("Run 'openclaw config init' to create one");
        return Ok(());
    }

    let config: GatewayConfig = config::load_config(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;

    print_info(&format!("Configuration file: {:?}", path));
    println!();
    println!("{}", format_config(&config)?);

    Ok(())
}

/// Print the config file path
pub fn config_path(config_path: Option<&PathBuf>) -> Result<()> {
    println!("{}", resolve_config_path(config_path).display());
    Ok(())
}

/// Initialize a default configuration with a freshly generated token
pub fn config_init(config_path: Option<&PathBuf>, force: bool) -> Result<()> {
    let path = resolve_config_path(config_path);

    if path.exists() && !force {
        print_error(&format!("Config file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    let config = GatewayConfig {
        auth: AuthConfig {
            token: Some(generate_token()),
            password: None,
        },
        ..Default::default()
    };
    write_config(&path, &config)?;

    print_success(&format!("Created configuration file: {:?}", path));
    print_info("A gateway token was generated; run 'openclaw pair' to show the pairing link");
    Ok(())
}

pub(crate) fn write_config(path: &Path, config: &GatewayConfig) -> Result<()> {
    config::save_config(path, config)
        .with_context(|| format!("Failed to write config file: {:?}", path))
}
