//! Recast Core - image conversion library
//!
//! This crate re-encodes and resizes raster images without leaving the
//! machine they were loaded on. Given the bytes of a JPEG, PNG, WebP or GIF
//! file it decodes the image, draws it onto an off-screen surface of the
//! requested size, encodes the surface as JPEG, PNG or WebP and names the
//! result after the input.
//!
//! # Pipeline
//!
//! - `input` - validates declared media type and size
//! - `options` - resolves output size and quality
//! - `decode` - bytes to RGBA pixels, EXIF orientation applied
//! - `surface` - the off-screen raster the image is resized onto
//! - `encode` - surface to JPEG / PNG / WebP bytes
//! - `convert` - one image through the whole pipeline
//! - `batch` - many images, one at a time, failures logged and skipped
//!
//! Everything is synchronous and single-threaded so it can run inside a
//! Web Worker through the WASM bindings.

pub mod batch;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod format;
pub mod input;
pub mod options;
pub mod size;
pub mod surface;

pub use batch::{convert_batch, convert_batch_report, BatchReport, BatchRunner, ConversionFailure};
pub use convert::{convert, derive_filename, ConversionResult, ConvertError, FailureKind};
pub use format::{InputMediaType, OutputFormat};
pub use input::{is_accepted, is_valid_image, validate, InputFile};
pub use options::ConversionOptions;
pub use size::format_file_size;
pub use surface::{FilterType, Surface, SurfaceError};
