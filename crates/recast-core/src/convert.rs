//! Single-image conversion: decode, draw onto a surface of the resolved
//! size, encode, and name the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode, EncodeError};
use crate::format::OutputFormat;
use crate::input::{validate, InputFile};
use crate::options::ConversionOptions;
use crate::surface::{Surface, SurfaceError};

/// Stem used when the input has no usable name.
const FALLBACK_STEM: &str = "image";

/// Why a single image could not be converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The file failed validation (media type or size).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The options cannot be applied to any image.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The off-screen surface could not be created.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// The bytes could not be decoded as an image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The codec could not produce output.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ConvertError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ConvertError::InvalidInput(_) => FailureKind::InvalidInput,
            ConvertError::InvalidOptions(_) => FailureKind::InvalidOptions,
            ConvertError::Surface(_) => FailureKind::SurfaceFailure,
            ConvertError::Decode(_) => FailureKind::DecodeFailure,
            ConvertError::Encode(_) => FailureKind::EncodeFailure,
        }
    }
}

/// Coarse category of a [`ConvertError`], stable for display and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    InvalidInput,
    InvalidOptions,
    SurfaceFailure,
    DecodeFailure,
    EncodeFailure,
}

/// An encoded image ready to be saved under `filename`.
///
/// Created once per successful conversion and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    bytes: Vec<u8>,
    filename: String,
    format: OutputFormat,
    width: u32,
    height: u32,
}

impl ConversionResult {
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[inline]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[inline]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded output in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Name of the converted file: the input name without its last extension,
/// followed by the target extension.
///
/// Only the last segment is dropped, not everything after the first dot:
/// `photo.tar.png` becomes `photo.tar.jpeg`. A leading dot does not start
/// an extension, so `.hidden` becomes `.hidden.jpeg`.
pub fn derive_filename(name: &str, format: OutputFormat) -> String {
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    format!("{}.{}", stem, format.extension())
}

/// Convert one image.
///
/// The surface the image is drawn onto lives only for the duration of this
/// call.
///
/// # Errors
///
/// Each failure stops work on this image only:
/// - `ConvertError::InvalidInput` if the file fails validation
/// - `ConvertError::InvalidOptions` for unusable options
/// - `ConvertError::Decode` for unreadable or corrupt image data
/// - `ConvertError::Surface` if the output surface cannot be created
/// - `ConvertError::Encode` if the codec fails
pub fn convert(
    input: &InputFile,
    options: &ConversionOptions,
) -> Result<ConversionResult, ConvertError> {
    validate(input)?;
    options.validate()?;

    let decoded = decode_image(input.bytes())?;
    let (width, height) = options.resolve_dimensions(decoded.width, decoded.height);

    let bytes = {
        let surface = Surface::render(decoded, width, height, options.filter)?;
        encode(&surface, options.format, options.resolve_quality())?
    };

    let result = ConversionResult {
        bytes,
        filename: derive_filename(input.name(), options.format),
        format: options.format,
        width,
        height,
    };

    log::debug!(
        "Converted {} ({} bytes) to {} {}x{} ({} bytes)",
        input.name(),
        input.size(),
        result.filename,
        width,
        height,
        result.size()
    );

    Ok(result)
}
