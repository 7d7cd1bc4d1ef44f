//! Image decoding for Recast.
//!
//! Turns the raw bytes of a JPEG, PNG, WebP or GIF file into an RGBA
//! [`DecodedImage`], sniffing the container format from its magic bytes
//! rather than trusting the declared media type. EXIF orientation is
//! applied so the decoded pixels match what a browser draws.
//!
//! All operations are synchronous and single-threaded within WASM.

mod source;
mod types;

pub use source::{apply_orientation, decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
