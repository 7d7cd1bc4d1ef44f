//! JPEG encoding.
//!
//! JPEG has no alpha channel. Transparent pixels are composited onto
//! black, which is what a browser canvas produces for `image/jpeg`.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{check_rgba_buffer, EncodeError};
use crate::format::OutputFormat;

/// Map a 0-1 quality fraction onto the encoder's 1-100 scale.
///
/// Values outside the range are clamped; NaN maps to 90.
pub fn quality_to_percent(quality: f64) -> u8 {
    if quality.is_nan() {
        return 90;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba_buffer(pixels, width, height)?;

    let rgb = flatten_onto_black(pixels);
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Drop the alpha channel, compositing each pixel over black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u16;
        for &channel in &px[..3] {
            rgb.push(((channel as u16 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces a complete JPEG for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
            alpha in any::<u8>(),
        ) {
            let pixels: Vec<u8> = [90u8, 160, 30, alpha]
                .iter()
                .copied()
                .cycle()
                .take((width * height * 4) as usize)
                .collect();

            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            let len = jpeg.len();
            prop_assert!(len >= 4);
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Any fraction maps into the encoder's 1-100 range.
        #[test]
        fn prop_quality_percent_in_range(quality in any::<f64>()) {
            let percent = quality_to_percent(quality);
            prop_assert!((1..=100).contains(&percent));
        }

        /// Property: Quality mapping never decreases as the fraction grows.
        #[test]
        fn prop_quality_percent_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(quality_to_percent(lo) <= quality_to_percent(hi));
        }
    }
}
