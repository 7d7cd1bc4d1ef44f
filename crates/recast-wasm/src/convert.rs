//! Image conversion WASM bindings.
//!
//! # Functions
//!
//! - [`convert_image`] - Convert one file
//! - [`convert_image_batch`] - Convert a list of files one after another
//! - [`convert_image_batch_async`] - Same, pausing after each file so the
//!   page can repaint
//! - [`is_valid_image`] - Check a file's declared type and size
//! - [`format_file_size`] - Human readable byte sizes
//!
//! # Example
//!
//! ```typescript
//! import { convert_image_batch, PreviewUrl } from '@recast/wasm';
//!
//! const files = await Promise.all(
//!   fileList.map(async (f) => ({
//!     name: f.name,
//!     type: f.type,
//!     bytes: new Uint8Array(await f.arrayBuffer()),
//!   })),
//! );
//! const report = await convert_image_batch_async(files, { format: 'webp', scale: 0.5 }, (done, total) => {
//!   progress.value = done / total;
//! });
//! for (let i = 0; i < report.length; i++) {
//!   const result = report.result(i);
//!   const link = PreviewUrl.fromResult(result);
//!   // offer link.url for download as result.filename, then link.revoke()
//! }
//! ```

use js_sys::{Array, Function, Promise, Reflect, Uint8Array};
use recast_core::{BatchRunner, ConversionOptions, InputFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::types::{JsBatchReport, JsConversionResult};

/// Convert a single image.
///
/// # Arguments
///
/// * `name` - Original filename, used to derive the output name
/// * `media_type` - Declared MIME type (`File.type`)
/// * `bytes` - File contents as a `Uint8Array`
/// * `options` - `{ format, quality?, width?, height?, scale?, filter? }`
///
/// # Errors
///
/// Returns an error if the options are malformed, the file fails
/// validation, or decoding / surface creation / encoding fails.
#[wasm_bindgen]
pub fn convert_image(
    name: &str,
    media_type: &str,
    bytes: &[u8],
    options: JsValue,
) -> Result<JsConversionResult, JsValue> {
    let options = options_from_js(options)?;
    let input = InputFile::new(name, media_type, bytes.to_vec());

    recast_core::convert(&input, &options)
        .map(JsConversionResult::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a list of images in order.
///
/// Each entry of `files` is `{ name, type, bytes }`. Entries are read
/// one at a time, so only the current file's bytes are copied into WASM
/// memory. A file that fails is logged and reported in `failures()`; it
/// never stops the batch.
///
/// `on_progress(done, total)` is called after every entry. An exception
/// thrown by the callback is logged and ignored.
///
/// # Errors
///
/// Only malformed `options` fail the whole call.
#[wasm_bindgen]
pub fn convert_image_batch(
    files: Array,
    options: JsValue,
    on_progress: Option<Function>,
) -> Result<JsBatchReport, JsValue> {
    let options = options_from_js(options)?;

    let inputs = (0..files.length()).map(|i| read_input(&files.get(i)));
    let mut progress = |done: usize, total: usize| report_progress(on_progress.as_ref(), done, total);

    let report = recast_core::convert_batch_report(inputs, &options, Some(&mut progress));
    Ok(JsBatchReport::from(report))
}

/// Convert a list of images in order, yielding to the event loop after
/// each one.
///
/// Takes the same arguments as [`convert_image_batch`] and resolves to the
/// same report. Every file is followed by its progress call and then a
/// `setTimeout(0)` pause, so a progress display updated from `on_progress`
/// is painted while the batch runs on the main thread.
///
/// # Errors
///
/// Only malformed `options` reject the promise.
#[wasm_bindgen]
pub async fn convert_image_batch_async(
    files: Array,
    options: JsValue,
    on_progress: Option<Function>,
) -> Result<JsBatchReport, JsValue> {
    let options = options_from_js(options)?;
    let total = files.length() as usize;
    let mut runner = BatchRunner::new(&options, total);

    for i in 0..files.length() {
        let done = {
            let input = read_input(&files.get(i));
            runner.step(&input)
        };
        report_progress(on_progress.as_ref(), done, total);
        next_task().await;
    }

    Ok(JsBatchReport::from(runner.finish()))
}

/// Call `on_progress(done, total)`, logging instead of propagating a throw.
fn report_progress(callback: Option<&Function>, done: usize, total: usize) {
    if let Some(callback) = callback {
        let done = JsValue::from(done as u32);
        let total = JsValue::from(total as u32);
        if let Err(e) = callback.call2(&JsValue::NULL, &done, &total) {
            log::warn!("Progress callback failed: {:?}", e);
        }
    }
}

/// Resolve on the next macrotask via the global `setTimeout`.
///
/// Works in windows and workers. Without a `setTimeout` it resolves
/// immediately.
async fn next_task() {
    let promise = Promise::new(&mut |resolve, _reject| {
        let global = js_sys::global();
        let set_timeout = Reflect::get(&global, &JsValue::from_str("setTimeout"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());

        let scheduled = set_timeout
            .map(|f| f.call2(&global, &resolve, &JsValue::from(0)).is_ok())
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });

    // resolve() never passes an error
    let _ = JsFuture::from(promise).await;
}

/// Check whether a file can be converted, from its declared type and size.
#[wasm_bindgen]
pub fn is_valid_image(media_type: &str, size: f64) -> bool {
    size.is_finite() && recast_core::is_accepted(media_type, size as u64)
}

/// Format a byte count for display, e.g. `"1.5 MB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    // `as` saturates: negative and NaN become 0
    recast_core::format_file_size(bytes as u64)
}

/// Deserialize and check conversion options.
fn options_from_js(options: JsValue) -> Result<ConversionOptions, JsValue> {
    let options: ConversionOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid conversion options: {}", e)))?;
    options
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(options)
}

/// Read a `{ name, type, bytes }` entry.
///
/// Missing fields become empty values, which the validator rejects.
fn read_input(entry: &JsValue) -> InputFile {
    let field = |key: &str| Reflect::get(entry, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED);

    let name = field("name").as_string().unwrap_or_default();
    let media_type = field("type").as_string().unwrap_or_default();
    let bytes = field("bytes");
    let bytes = if bytes.is_instance_of::<Uint8Array>() || bytes.is_instance_of::<js_sys::ArrayBuffer>() {
        Uint8Array::new(&bytes).to_vec()
    } else {
        Vec::new()
    };

    InputFile::new(name, media_type, bytes)
}

/// Tests for conversion bindings.
///
/// Note: Most binding tests use functions that take or return `JsValue`,
/// which only work on wasm32 targets. For comprehensive conversion testing,
/// see the tests in `recast_core` which test the underlying functionality.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_image() {
        assert!(is_valid_image("image/png", 10.0));
        assert!(is_valid_image("image/gif", 1.0));
        assert!(!is_valid_image("image/png", 0.0));
        assert!(!is_valid_image("image/bmp", 10.0));
        assert!(!is_valid_image("image/png", f64::NAN));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0.0), "0 Bytes");
        assert_eq!(format_file_size(1023.0), "1023 Bytes");
        assert_eq!(format_file_size(1024.0), "1 KB");
        assert_eq!(format_file_size(-5.0), "0 Bytes");
    }
}
