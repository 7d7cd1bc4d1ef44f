//! WebP encoding.
//!
//! Lossy VP8 through libwebp. Alpha is kept.

use super::{check_rgba_buffer, EncodeError};
use crate::format::OutputFormat;

/// Encode RGBA pixel data to lossy WebP bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - WebP quality (1-100, where 100 is highest quality)
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba_buffer(pixels, width, height)?;

    let quality = quality.clamp(1, 100) as f32;
    let encoded = webp::Encoder::from_rgba(pixels, width, height)
        .encode_simple(false, quality)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Webp,
            reason: format!("{:?}", e),
        })?;

    Ok(encoded.to_vec())
}
