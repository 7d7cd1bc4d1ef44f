//! Decoding of source files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is sniffed from the bytes. Animated GIFs yield
/// their first frame.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported image.
/// Returns `DecodeError::CorruptedFile` if the image is corrupted or truncated.
/// Returns `DecodeError::EmptyImage` if the image has zero width or height.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);
    let img = read_dynamic(bytes)?;

    into_decoded(apply_orientation(img, orientation))
}

/// Extract the EXIF orientation of an image.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

fn into_decoded(img: DynamicImage) -> Result<DecodedImage, DecodeError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    Ok(DecodedImage::from_rgba_image(img.into_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn encoded(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        match format {
            // JPEG cannot carry alpha
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
                .into_rgb8()
                .write_to(&mut buf, format)
                .unwrap(),
            _ => img.write_to(&mut buf, format).unwrap(),
        }
        buf.into_inner()
    }

    fn two_by_one() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        img
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let bytes = encoded(&two_by_one(), ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixels, vec![255, 0, 0, 255, 0, 255, 0, 128]);
    }

    #[test]
    fn test_decode_every_input_format() {
        let source = RgbaImage::from_pixel(7, 5, Rgba([40, 80, 120, 255]));

        for format in [
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::WebP,
            ImageFormat::Gif,
        ] {
            let bytes = encoded(&source, format);
            let img = decode_image(&bytes)
                .unwrap_or_else(|e| panic!("{:?} failed to decode: {}", format, e));
            assert_eq!((img.width, img.height), (7, 5), "{:?}", format);
            assert_eq!(img.pixels.len(), 7 * 5 * 4);
        }
    }

    #[test]
    fn test_decode_unknown_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encoded(&RgbaImage::new(16, 16), ImageFormat::Png);
        // Signature intact, data cut short
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = encoded(&two_by_one(), ImageFormat::Png);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let img = DynamicImage::ImageRgba8(two_by_one());
        let rotated = apply_orientation(img, Orientation::Rotate90CW).into_rgba8();
        assert_eq!(rotated.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let img = DynamicImage::ImageRgba8(two_by_one());
        let rotated = apply_orientation(img, Orientation::Rotate180).into_rgba8();

        assert_eq!(rotated.dimensions(), (2, 1));
        assert_eq!(rotated.get_pixel(0, 0).0, [0, 255, 0, 128]);
        assert_eq!(rotated.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let img = DynamicImage::ImageRgba8(two_by_one());
        let flipped = apply_orientation(img, Orientation::FlipHorizontal).into_rgba8();

        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0, 128]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_transpose_swaps_dimensions() {
        for orientation in [Orientation::Transpose, Orientation::Transverse] {
            let img = DynamicImage::ImageRgba8(RgbaImage::new(6, 2));
            let out = apply_orientation(img, orientation);
            assert_eq!((out.width(), out.height()), (2, 6));
        }
    }
}
