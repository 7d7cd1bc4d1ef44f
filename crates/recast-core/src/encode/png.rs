//! PNG encoding. Lossless, so there is no quality setting.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{check_rgba_buffer, EncodeError};
use crate::format::OutputFormat;

/// Encode RGBA pixel data to PNG bytes, keeping the alpha channel.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_rgba_buffer(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Png,
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
