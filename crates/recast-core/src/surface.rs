//! Off-screen raster surface.
//!
//! A [`Surface`] is the in-memory pixel buffer a source image is drawn
//! into at its output size before encoding. Drawing performs the resize;
//! the surface itself is owned by a single conversion and dropped as soon
//! as the encoder has consumed it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Largest edge a surface may have, matching common browser canvas limits.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Largest pixel area a surface may have (16384 x 16384).
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Errors that can occur while creating a surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// Width or height is zero
    #[error("Invalid surface dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Surface exceeds the supported size
    #[error("Surface too large: {width}x{height} exceeds the supported size")]
    TooLarge { width: u32, height: u32 },

    /// Source image buffer does not match its declared dimensions
    #[error("Source image buffer does not match {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
}

/// Filter type for drawing an image onto a surface of a different size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An RGBA raster of fixed dimensions holding one rendered image.
#[derive(Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Check that a surface of the given size can be created.
    pub fn check_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        if width > MAX_SURFACE_DIMENSION
            || height > MAX_SURFACE_DIMENSION
            || width as u64 * height as u64 > MAX_SURFACE_AREA
        {
            return Err(SurfaceError::TooLarge { width, height });
        }
        Ok(())
    }

    /// Draw `image` onto a new surface of `width` x `height` pixels.
    ///
    /// The image is stretched to fill the surface; aspect ratio is the
    /// caller's concern. The decoded image is consumed so its buffer is
    /// reused or freed as soon as the surface exists.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::InvalidDimensions` for a zero-sized target,
    /// `SurfaceError::TooLarge` beyond the surface limits and
    /// `SurfaceError::InvalidSource` if the source buffer is malformed.
    pub fn render(
        image: DecodedImage,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<Self, SurfaceError> {
        Self::check_dimensions(width, height)?;

        let source = image.as_rgba_view().ok_or(SurfaceError::InvalidSource {
            width: image.width,
            height: image.height,
        })?;

        // Fast path: same size, take the pixels as they are
        if image.width == width && image.height == height {
            return Ok(Self {
                width,
                height,
                pixels: image.pixels,
            });
        }

        let resized = image::imageops::resize(&source, width, height, filter.to_image_filter());
        drop(image);

        Ok(Self {
            width,
            height,
            pixels: resized.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixel data in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
