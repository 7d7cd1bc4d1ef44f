//! WASM-compatible wrapper types for conversion output.
//!
//! This module provides JavaScript-friendly types that wrap the core Recast
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use recast_core::{BatchReport, ConversionResult};
use wasm_bindgen::prelude::*;

/// A converted image for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`; call it once when building the download blob, then call
/// `free()` to release the WASM side.
#[wasm_bindgen]
pub struct JsConversionResult {
    inner: ConversionResult,
}

#[wasm_bindgen]
impl JsConversionResult {
    /// Derived filename (input stem + target extension)
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename().to_string()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Output format name ("jpeg", "png" or "webp")
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format().name().to_string()
    }

    /// MIME type for the download blob
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// Returns the encoded bytes as Uint8Array.
    ///
    /// Note: This creates a copy of the data.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }
}

impl JsConversionResult {
    pub(crate) fn inner(&self) -> &ConversionResult {
        &self.inner
    }
}

impl From<ConversionResult> for JsConversionResult {
    fn from(inner: ConversionResult) -> Self {
        Self { inner }
    }
}

/// Outcome of a batch conversion for JavaScript.
///
/// Results keep input order. Items that produced nothing are listed in
/// `failures()` as `{ index, name, kind, message }` objects.
#[wasm_bindgen]
pub struct JsBatchReport {
    inner: BatchReport,
}

#[wasm_bindgen]
impl JsBatchReport {
    /// Number of converted images
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.results.len()
    }

    /// Number of items that were skipped or failed
    #[wasm_bindgen(getter, js_name = failureCount)]
    pub fn failure_count(&self) -> usize {
        self.inner.failures.len()
    }

    /// Total size of all converted images in bytes
    #[wasm_bindgen(getter, js_name = totalSize)]
    pub fn total_size(&self) -> f64 {
        self.inner.total_size() as f64
    }

    /// Get a converted image by position.
    ///
    /// Note: This clones the encoded bytes.
    pub fn result(&self, index: usize) -> Option<JsConversionResult> {
        self.inner
            .results
            .get(index)
            .cloned()
            .map(JsConversionResult::from)
    }

    /// Failure records as plain JavaScript objects.
    pub fn failures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.failures)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl From<BatchReport> for JsBatchReport {
    fn from(inner: BatchReport) -> Self {
        Self { inner }
    }
}
