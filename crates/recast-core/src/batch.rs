//! Sequential batch conversion.
//!
//! Inputs are converted strictly one after another so at most one decoded
//! image and one surface are alive at a time. A failing item is logged and
//! left out of the results; it never aborts the batch.

use std::borrow::Borrow;

use serde::Serialize;

use crate::convert::{convert, ConversionResult, ConvertError, FailureKind};
use crate::input::InputFile;
use crate::options::ConversionOptions;

/// An item that produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionFailure {
    /// Position of the item in the input list.
    pub index: usize,
    /// Name of the input file.
    pub name: String,
    pub kind: FailureKind,
    /// Human readable reason.
    pub message: String,
}

impl ConversionFailure {
    fn new(index: usize, input: &InputFile, err: &ConvertError) -> Self {
        Self {
            index,
            name: input.name().to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Everything a batch produced: results in input order, plus one failure
/// record per item that was skipped or failed.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<ConversionResult>,
    pub failures: Vec<ConversionFailure>,
}

impl BatchReport {
    /// Number of items the batch looked at.
    pub fn processed(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    /// True when nothing was converted.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total encoded size of all results in bytes.
    pub fn total_size(&self) -> u64 {
        self.results.iter().map(|r| r.size() as u64).sum()
    }
}

/// Convert `inputs` in order and return the successful results.
///
/// `on_progress` is called with `(done, total)` after every item,
/// whether it succeeded, failed or was skipped. An empty input list yields
/// no results and no progress calls.
pub fn convert_batch(
    inputs: &[InputFile],
    options: &ConversionOptions,
    on_progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Vec<ConversionResult> {
    convert_batch_report(inputs, options, on_progress).results
}

/// Like [`convert_batch`], but also reports which items produced nothing
/// and why.
///
/// Accepts any exact-size iterator so callers can produce each input
/// lazily and keep only the current one in memory.
pub fn convert_batch_report<I>(
    inputs: I,
    options: &ConversionOptions,
    mut on_progress: Option<&mut dyn FnMut(usize, usize)>,
) -> BatchReport
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Borrow<InputFile>,
{
    let inputs = inputs.into_iter();
    let mut runner = BatchRunner::new(options, inputs.len());

    for input in inputs {
        let input: &InputFile = input.borrow();
        let done = runner.step(input);

        if let Some(callback) = on_progress.as_mut() {
            callback(done, runner.total());
        }
    }

    runner.finish()
}

/// A batch driven one item at a time.
///
/// Used by callers that need to hand control back between items, e.g. to
/// let a browser repaint a progress bar. [`convert_batch_report`] is this
/// loop without the pauses.
#[derive(Debug)]
pub struct BatchRunner<'a> {
    options: &'a ConversionOptions,
    total: usize,
    done: usize,
    report: BatchReport,
}

impl<'a> BatchRunner<'a> {
    pub fn new(options: &'a ConversionOptions, total: usize) -> Self {
        Self {
            options,
            total,
            done: 0,
            report: BatchReport::default(),
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn done(&self) -> usize {
        self.done
    }

    /// Convert the next item and return how many items have been processed.
    pub fn step(&mut self, input: &InputFile) -> usize {
        let index = self.done;
        match convert(input, self.options) {
            Ok(result) => self.report.results.push(result),
            Err(err @ ConvertError::InvalidInput(_)) => {
                log::warn!("Skipping {}: {}", input.name(), err);
                self.report
                    .failures
                    .push(ConversionFailure::new(index, input, &err));
            }
            Err(err) => {
                log::warn!("Failed to convert {}: {}", input.name(), err);
                self.report
                    .failures
                    .push(ConversionFailure::new(index, input, &err));
            }
        }

        self.done += 1;
        self.done
    }

    /// Stop and return what was produced so far.
    pub fn finish(self) -> BatchReport {
        if self.done > 0 {
            log::info!(
                "Converted {}/{} images to {} ({} bytes)",
                self.report.results.len(),
                self.done,
                self.options.format,
                self.report.total_size()
            );
        }

        self.report
    }
}
