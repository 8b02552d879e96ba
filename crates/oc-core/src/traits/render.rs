//! QR rendering traits

use async_trait::async_trait;

use crate::error::RenderError;

/// Renders a URI as a QR code image
#[async_trait]
pub trait QrRenderer: Send + Sync {
    /// Encode `uri` as a QR code and return the PNG bytes, base64-encoded
    async fn render_png_base64(&self, uri: &str) -> Result<String, RenderError>;
}
