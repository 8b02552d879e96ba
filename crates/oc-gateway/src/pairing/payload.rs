//! Pairing payload construction

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use oc_core::auth::AuthConfig;
use oc_core::error::RenderError;
use oc_core::traits::QrRenderer;

/// Scheme and authority of pairing deep links
pub const DEEP_LINK_BASE: &str = "openclaw://gateway";

/// Everything a remote client needs to connect to this gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingPayload {
    pub deep_link: String,
    pub qr_image_base64: String,
    pub host: String,
    pub port: u16,
    pub tls: bool,
}

/// Build the pairing deep link
///
/// Parameters are always emitted in the order host, port, tls, token,
/// password; the secrets only when configured.
pub fn build_deep_link(host: &str, port: u16, tls: bool, auth: &AuthConfig) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("host", host)
        .append_pair("port", &port.to_string())
        .append_pair("tls", if tls { "true" } else { "false" });
    if let Some(token) = auth.token() {
        query.append_pair("token", token);
    }
    if let Some(password) = auth.password() {
        query.append_pair("password", password);
    }

    format!("{}?{}", DEEP_LINK_BASE, query.finish())
}

/// Build the full payload, rendering the link as a QR code
pub async fn build_pairing_payload(
    host: String,
    port: u16,
    tls: bool,
    auth: &AuthConfig,
    renderer: &dyn QrRenderer,
) -> Result<PairingPayload, RenderError> {
    let deep_link = build_deep_link(&host, port, tls, auth);
    let qr_image_base64 = renderer.render_png_base64(&deep_link).await?;

    Ok(PairingPayload {
        deep_link,
        qr_image_base64,
        host,
        port,
        tls,
    })
}
