//! Token command implementations

use std::path::PathBuf;

use anyhow::Result;

use super::config::{load_gateway_config, resolve_config_path, write_config};
use crate::output::{print_success, print_warning};
use oc_core::auth::generate_token;

/// Replace the gateway token with a new random one and print it
///
/// Clients paired with the old token must pair again.
pub fn token_rotate(config_path: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(config_path);
    let mut config = load_gateway_config(config_path)?;

    let token = generate_token();
    config.auth.token = Some(token.clone());
    write_config(&path, &config)?;

    print_success(&format!("Stored new gateway token in {:?}", path));
    print_warning("Restart the gateway and re-pair existing clients");
    println!("{}", token);
    Ok(())
}
