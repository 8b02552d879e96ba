//! QR code rendering for pairing links

use std::io::Cursor;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use oc_core::error::RenderError;
use oc_core::traits::QrRenderer;

/// Smallest edge length of the rendered image, in pixels
const MIN_IMAGE_SIZE: u32 = 256;

/// Renders QR codes as grayscale PNGs
///
/// Encoding is CPU-bound, so it runs on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrRenderer;

impl PngQrRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QrRenderer for PngQrRenderer {
    async fn render_png_base64(&self, uri: &str) -> Result<String, RenderError> {
        let uri = uri.to_string();
        tokio::task::spawn_blocking(move || render_png(&uri))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
            .map(|png| BASE64.encode(png))
    }
}

/// Encode `data` as a QR code and return PNG bytes
pub fn render_png(data: &str) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| RenderError::Encode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_IMAGE_SIZE, MIN_IMAGE_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| RenderError::Image(e.to_string()))?;
    Ok(png)
}

/// Encode `data` as a QR code drawn with Unicode half blocks for a terminal
///
/// Colors are inverted so the code reads on dark terminal backgrounds.
pub fn render_terminal(data: &str) -> Result<String, RenderError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build())
}
