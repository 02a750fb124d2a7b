//! Raster snapshot export.
//!
//! Encodes a rendered [`Pixmap`] as PNG or JPEG and wraps the bytes in a
//! `data:` URI for hosts that want a single string payload.

use base64::Engine;
use image::ImageEncoder;
use tiny_skia::Pixmap;

use crate::error::{RenderError, RenderResult};

/// Default JPEG quality on the 0.0 to 1.0 scale.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.92;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// PNG image.
    #[default]
    Png,
    /// JPEG image.
    Jpeg,
}

impl ExportFormat {
    /// Resolve a mime type. Anything unrecognized falls back to PNG.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/png" => Self::Png,
            other => {
                tracing::debug!("Unsupported export mime type '{other}', using PNG");
                Self::Png
            }
        }
    }

    /// Mime type written into data URIs.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Configuration for snapshot export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// Color composited under translucent pixels for formats without alpha.
    pub background: [u8; 4],
    /// JPEG quality, 0.0 to 1.0.
    pub jpeg_quality: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 255],
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportConfig {
    /// Config with the given JPEG quality, clamped to 0.0 to 1.0.
    ///
    /// Non-finite values keep the default.
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        if quality.is_finite() {
            self.jpeg_quality = quality.clamp(0.0, 1.0);
        }
        self
    }

    /// JPEG quality on the encoder's 1 to 100 scale.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encoder_quality(&self) -> u8 {
        let q = if self.jpeg_quality.is_finite() {
            self.jpeg_quality.clamp(0.0, 1.0)
        } else {
            DEFAULT_JPEG_QUALITY
        };
        ((q * 100.0).round() as u8).max(1)
    }
}

/// Encode a pixmap in the given format.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn encode(pixmap: &Pixmap, format: ExportFormat, config: &ExportConfig) -> RenderResult<Vec<u8>> {
    match format {
        ExportFormat::Png => pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}"))),
        ExportFormat::Jpeg => encode_jpeg(pixmap, config),
    }
}

fn encode_jpeg(pixmap: &Pixmap, config: &ExportConfig) -> RenderResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let rgb = flatten_rgb(pixmap.data(), config.background);

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, config.encoder_quality());
    encoder
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

/// Composite premultiplied RGBA over an opaque background, dropping alpha.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn flatten_rgb(premultiplied: &[u8], background: [u8; 4]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(premultiplied.len() / 4 * 3);
    for px in premultiplied.chunks_exact(4) {
        let inv = 1.0 - f32::from(px[3]) / 255.0;
        for c in 0..3 {
            let v = f32::from(background[c]).mul_add(inv, f32::from(px[c]));
            rgb.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    rgb
}

/// Wrap encoded bytes in a base64 `data:` URI.
#[must_use]
pub fn to_data_uri(bytes: &[u8], format: ExportFormat) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{encoded}", format.mime_type())
}
