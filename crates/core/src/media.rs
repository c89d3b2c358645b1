//! Upload normalization: bounded-size inline images.
//!
//! Uploaded photos are decoded, scaled to a fixed display width, and
//! re-encoded as JPEG wrapped in a `data:` URI, so the listing document
//! is self-contained and needs no object-storage round trip. The encoded
//! document grows with image size; callers cap source dimensions upstream
//! if store document limits apply.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::CoreError;

/// Target output width in pixels.
pub const TARGET_WIDTH: u32 = 800;

/// JPEG quality factor (1-100).
pub const JPEG_QUALITY: u8 = 80;

/// URI prefix of every normalized image.
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Decode `bytes`, scale to `max_width` preserving aspect ratio, and
/// re-encode as a JPEG data URI.
///
/// Height scales proportionally (`new_h = h * max_width / w`); images
/// narrower than `max_width` are scaled up. Runs once per submission, at
/// submit time rather than upload time.
pub fn normalize_image(bytes: &[u8], max_width: u32) -> Result<String, CoreError> {
    let img = image::load_from_memory(bytes)?;

    let (width, height) = (img.width(), img.height());
    let scale = f64::from(max_width) / f64::from(width);
    // Extreme aspect ratios must not collapse to a zero-height image.
    let new_height = (f64::from(height) * scale).round().max(1.0) as u32;
    let resized = img.resize_exact(max_width, new_height, FilterType::Triangle);

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    resized.to_rgb8().write_with_encoder(encoder)?;

    Ok(format!("{DATA_URI_PREFIX}{}", BASE64.encode(&jpeg)))
}
