//! Recast WASM - WebAssembly bindings for Recast
//!
//! This crate exposes the recast-core conversion pipeline to JavaScript so
//! images can be re-encoded and resized in the browser without uploading
//! them anywhere.
//!
//! # Module Structure
//!
//! - `convert` - Single and batch conversion, validation, size formatting
//! - `types` - WASM-compatible wrappers for results and batch reports
//! - `preview` - Object URLs that are revoked when released
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { convert_image } from '@recast/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = convert_image(file.name, file.type, bytes, { format: 'jpeg', quality: 0.85 });
//! console.log(`${result.filename}: ${result.size} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod logger;
mod preview;
mod types;

// Re-export public types
pub use convert::{
    convert_image, convert_image_batch, convert_image_batch_async, format_file_size, is_valid_image,
};
pub use logger::set_log_level;
pub use preview::{PreviewSet, PreviewUrl};
pub use types::{JsBatchReport, JsConversionResult};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(logger::default_level());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
