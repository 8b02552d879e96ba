//! Pair command implementation
//!
//! Prints the pairing link for this machine. The operator at the terminal is
//! trusted the same way a loopback caller of the HTTP route is, so the full
//! secret set goes into the link.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::config::load_gateway_config;
use crate::output::{format_pairing_summary, print_info, print_success, print_warning};
use oc_core::net::SystemLanAddress;
use oc_gateway::pairing::{build_deep_link, resolve_reachable_host};
use oc_gateway::qr::{render_png, render_terminal};

/// Print the deep link and QR code a client scans to pair
pub fn pair_command(
    config_path: Option<&PathBuf>,
    qr_out: Option<&Path>,
    show_qr: bool,
) -> Result<()> {
    let config = load_gateway_config(config_path)?;

    let host = resolve_reachable_host(&config.bind_host, &SystemLanAddress)
        .ok_or_else(|| anyhow!("Cannot determine reachable host address"))?;
    let tls = config.tls_enabled();

    if !config.auth.has_secret() {
        print_warning("No gateway token or password configured");
        print_info("Run 'openclaw token rotate' to create one");
    }

    let link = build_deep_link(&host, config.port, tls, &config.auth);

    if show_qr {
        let art = render_terminal(&link).context("Failed to render QR code")?;
        println!("{}", art);
    }

    print_info(&format!(
        "Gateway: {}",
        format_pairing_summary(&host, config.port, tls)
    ));
    println!("{}", link);

    if let Some(path) = qr_out {
        let png = render_png(&link).context("Failed to render QR code")?;
        std::fs::write(path, png).with_context(|| format!("Failed to write {:?}", path))?;
        print_success(&format!("Wrote QR code to {:?}", path));
    }

    Ok(())
}
