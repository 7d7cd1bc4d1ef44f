//! Image encoding for Recast.
//!
//! Turns a rendered [`Surface`] into the binary representation of the
//! requested [`OutputFormat`]:
//! - JPEG with a 0-1 quality mapped onto the encoder's 1-100 scale
//! - PNG, lossless, quality ignored
//! - WebP, lossy, with the same quality mapping as JPEG
//!
//! All operations are synchronous and single-threaded within WASM.

mod jpeg;
mod png;
mod webp;

use thiserror::Error;

use crate::format::OutputFormat;
use crate::surface::Surface;

pub use jpeg::{encode_jpeg, quality_to_percent};
pub use png::encode_png;
pub use webp::encode_webp;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec failed to produce output
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed {
        format: OutputFormat,
        reason: String,
    },
}

/// Encode a rendered surface to `format`.
///
/// `quality` is a 0-1 fraction and is ignored for PNG. Pass the already
/// resolved value (see `ConversionOptions::resolve_quality`); a missing
/// quality on a lossy format falls back to its default.
pub fn encode(
    surface: &Surface,
    format: OutputFormat,
    quality: Option<f64>,
) -> Result<Vec<u8>, EncodeError> {
    let (pixels, width, height) = (surface.pixels(), surface.width(), surface.height());

    let percent = quality
        .or(format.default_quality())
        .map(quality_to_percent);

    match (format, percent) {
        (OutputFormat::Png, _) => encode_png(pixels, width, height),
        (OutputFormat::Jpeg, percent) => encode_jpeg(pixels, width, height, percent.unwrap_or(90)),
        (OutputFormat::Webp, percent) => encode_webp(pixels, width, height, percent.unwrap_or(80)),
    }
}

/// Check an RGBA buffer against its declared dimensions.
pub(crate) fn check_rgba_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::surface::FilterType;

    fn surface(width: u32, height: u32, rgba: [u8; 4]) -> Surface {
        let img = DecodedImage::solid(width, height, rgba);
        Surface::render(img, width, height, FilterType::Nearest).unwrap()
    }

    #[test]
    fn test_encode_dispatches_by_format() {
        let s = surface(8, 8, [200, 100, 50, 255]);

        let jpeg = encode(&s, OutputFormat::Jpeg, Some(0.9)).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&s, OutputFormat::Png, None).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");

        let webp = encode(&s, OutputFormat::Webp, Some(0.8)).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_png_ignores_quality() {
        let s = surface(16, 16, [10, 20, 30, 255]);

        let low = encode(&s, OutputFormat::Png, Some(0.1)).unwrap();
        let high = encode(&s, OutputFormat::Png, Some(1.0)).unwrap();
        let none = encode(&s, OutputFormat::Png, None).unwrap();

        assert_eq!(low, high);
        assert_eq!(low, none);
    }

    #[test]
    fn test_jpeg_without_quality_uses_default() {
        let s = surface(16, 16, [10, 20, 30, 255]);

        let default = encode(&s, OutputFormat::Jpeg, None).unwrap();
        let explicit = encode(&s, OutputFormat::Jpeg, Some(0.9)).unwrap();
        assert_eq!(default, explicit);
    }

    #[test]
    fn test_webp_quality_reaches_encoder() {
        let img = DecodedImage {
            width: 64,
            height: 64,
            pixels: (0..64u32 * 64)
                .flat_map(|i| [(i % 64 * 4) as u8, (i / 64 * 4) as u8, (i % 7 * 36) as u8, 255])
                .collect(),
        };
        let s = Surface::render(img, 64, 64, FilterType::Nearest).unwrap();

        let low = encode(&s, OutputFormat::Webp, Some(0.05)).unwrap();
        let high = encode(&s, OutputFormat::Webp, Some(1.0)).unwrap();
        assert_ne!(low, high);

        let default = encode(&s, OutputFormat::Webp, None).unwrap();
        let explicit = encode(&s, OutputFormat::Webp, Some(0.8)).unwrap();
        assert_eq!(default, explicit);
    }

    #[test]
    fn test_check_rgba_buffer() {
        assert!(check_rgba_buffer(&[0; 16], 2, 2).is_ok());
        assert!(matches!(
            check_rgba_buffer(&[0; 12], 2, 2),
            Err(EncodeError::InvalidPixelData {
                expected: 16,
                actual: 12
            })
        ));
        assert!(matches!(
            check_rgba_buffer(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::EncodingFailed {
            format: OutputFormat::Webp,
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "webp encoding failed: boom");
    }
}
