//! Object URLs for previews and downloads.
//!
//! A URL created with `URL.createObjectURL` pins its blob in memory until
//! it is revoked. [`PreviewUrl`] revokes on drop, and [`PreviewSet`] owns
//! the URLs of a file list so removing an entry or dropping the set
//! releases them.

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::types::JsConversionResult;

/// An object URL that is revoked when this value is released.
#[wasm_bindgen]
pub struct PreviewUrl {
    url: String,
}

#[wasm_bindgen]
impl PreviewUrl {
    /// Create an object URL for `bytes` served as `mime_type`.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8], mime_type: &str) -> Result<PreviewUrl, JsValue> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;
        Ok(PreviewUrl { url })
    }

    /// Object URL for a converted image, e.g. as a download link target.
    #[wasm_bindgen(js_name = fromResult)]
    pub fn from_result(result: &JsConversionResult) -> Result<PreviewUrl, JsValue> {
        let inner = result.inner();
        Self::new(inner.bytes(), inner.mime_type())
    }

    /// The `blob:` URL
    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Revoke the URL now instead of when the value is garbage collected.
    pub fn revoke(self) {
        // Dropping self revokes the URL
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("Failed to revoke {}: {:?}", self.url, e);
        }
    }
}

/// Object URLs for a list of files, kept in the order they were added.
#[wasm_bindgen]
#[derive(Default)]
pub struct PreviewSet {
    entries: Vec<PreviewUrl>,
}

#[wasm_bindgen]
impl PreviewSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PreviewSet {
        PreviewSet::default()
    }

    /// Create a URL for a newly added file and return it.
    pub fn add(&mut self, bytes: &[u8], mime_type: &str) -> Result<String, JsValue> {
        let preview = PreviewUrl::new(bytes, mime_type)?;
        let url = preview.url();
        self.entries.push(preview);
        Ok(url)
    }

    /// URL of the file at `index`
    pub fn url(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(PreviewUrl::url)
    }

    /// Remove the file at `index`, revoking its URL.
    ///
    /// Returns false if there is no such entry.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Revoke every URL.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.entries.len()
    }
}
