//! Conversion options and the output size/quality policy.

use serde::{Deserialize, Serialize};

use crate::convert::ConvertError;
use crate::format::OutputFormat;
use crate::surface::FilterType;

/// Options shared by every image in a conversion.
///
/// Sizing is layered, first match wins:
/// 1. `scale` - both sides multiplied by the fraction and rounded
/// 2. `width` and `height` - used as given
/// 3. `width` or `height` alone - the other side follows the aspect ratio
/// 4. nothing - the source size
///
/// Zero values count as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Target format.
    pub format: OutputFormat,
    /// Quality fraction (0 to 1), lossy formats only.
    #[serde(default)]
    pub quality: Option<f64>,
    /// Target width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Target height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Scale fraction applied to both sides.
    #[serde(default)]
    pub scale: Option<f64>,
    /// Resampling filter used when the size changes.
    #[serde(default)]
    pub filter: FilterType,
}

impl ConversionOptions {
    /// Options converting to `format` at the source size and default quality.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quality: None,
            width: None,
            height: None,
            scale: None,
            filter: FilterType::default(),
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Reject option values no image could be converted with.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale < 0.0 {
                return Err(ConvertError::InvalidOptions(format!(
                    "scale must be a non-negative number, got {}",
                    scale
                )));
            }
        }
        Ok(())
    }

    /// Output dimensions for a source of `src_width` x `src_height`.
    ///
    /// Every returned side is at least 1 pixel.
    pub fn resolve_dimensions(&self, src_width: u32, src_height: u32) -> (u32, u32) {
        let width = self.width.filter(|&w| w > 0);
        let height = self.height.filter(|&h| h > 0);
        let scale = self.scale.filter(|s| s.is_finite() && *s > 0.0);

        let (w, h) = match (scale, width, height) {
            (Some(s), _, _) => (
                scale_side(src_width, s),
                scale_side(src_height, s),
            ),
            (None, Some(w), Some(h)) => (w, h),
            (None, Some(w), None) if src_width > 0 => {
                (w, follow_ratio(src_height, src_width, w))
            }
            (None, None, Some(h)) if src_height > 0 => {
                (follow_ratio(src_width, src_height, h), h)
            }
            _ => (src_width, src_height),
        };

        (w.max(1), h.max(1))
    }

    /// Quality handed to the encoder.
    ///
    /// `None` for lossless formats even when a quality was supplied.
    /// Otherwise the supplied fraction clamped to 0-1, or the format default
    /// when missing or not a number.
    pub fn resolve_quality(&self) -> Option<f64> {
        if !self.format.is_lossy() {
            return None;
        }
        let default = self.format.default_quality()?;
        Some(
            self.quality
                .filter(|q| q.is_finite())
                .map_or(default, |q| q.clamp(0.0, 1.0)),
        )
    }
}

fn scale_side(side: u32, scale: f64) -> u32 {
    (side as f64 * scale).round().min(u32::MAX as f64) as u32
}

/// `numer / denom * target`, rounded.
fn follow_ratio(numer: u32, denom: u32, target: u32) -> u32 {
    (numer as f64 / denom as f64 * target as f64)
        .round()
        .min(u32::MAX as f64) as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = OutputFormat> {
        prop::sample::select(OutputFormat::ALL.to_vec())
    }

    proptest! {
        /// Property: With a scale, both sides are the rounded products.
        #[test]
        fn prop_scale_rounds_each_side(
            src_w in 1u32..=8000,
            src_h in 1u32..=8000,
            scale in 0.01f64..=4.0,
        ) {
            let opts = ConversionOptions::new(OutputFormat::Png).with_scale(scale);
            let (w, h) = opts.resolve_dimensions(src_w, src_h);

            let expected_w = ((src_w as f64 * scale).round() as u32).max(1);
            let expected_h = ((src_h as f64 * scale).round() as u32).max(1);
            prop_assert_eq!((w, h), (expected_w, expected_h));
        }

        /// Property: Resolved dimensions are never zero.
        #[test]
        fn prop_dimensions_never_zero(
            src_w in 0u32..=5000,
            src_h in 0u32..=5000,
            width in proptest::option::of(0u32..=5000),
            height in proptest::option::of(0u32..=5000),
            scale in proptest::option::of(0.0f64..=2.0),
        ) {
            let opts = ConversionOptions {
                width,
                height,
                scale,
                ..ConversionOptions::new(OutputFormat::Jpeg)
            };
            let (w, h) = opts.resolve_dimensions(src_w, src_h);
            prop_assert!(w >= 1 && h >= 1);
        }

        /// Property: A single explicit side is honored exactly.
        #[test]
        fn prop_single_side_is_exact(
            src_w in 1u32..=5000,
            src_h in 1u32..=5000,
            target in 1u32..=5000,
        ) {
            let by_width = ConversionOptions::new(OutputFormat::Png).with_width(target);
            prop_assert_eq!(by_width.resolve_dimensions(src_w, src_h).0, target);

            let by_height = ConversionOptions::new(OutputFormat::Png).with_height(target);
            prop_assert_eq!(by_height.resolve_dimensions(src_w, src_h).1, target);
        }

        /// Property: Omitted quality resolves to the format default.
        #[test]
        fn prop_quality_defaults(format in format_strategy()) {
            let opts = ConversionOptions::new(format);
            prop_assert_eq!(opts.resolve_quality(), format.default_quality());
        }

        /// Property: PNG never carries a quality.
        #[test]
        fn prop_png_ignores_quality(quality in any::<f64>()) {
            let opts = ConversionOptions::new(OutputFormat::Png).with_quality(quality);
            prop_assert_eq!(opts.resolve_quality(), None);
        }

        /// Property: Lossy quality always lands in 0-1.
        #[test]
        fn prop_lossy_quality_in_range(quality in any::<f64>()) {
            for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
                let q = ConversionOptions::new(format)
                    .with_quality(quality)
                    .resolve_quality()
                    .unwrap();
                prop_assert!((0.0..=1.0).contains(&q));
            }
        }
    }
}
