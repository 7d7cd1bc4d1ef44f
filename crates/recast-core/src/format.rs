//! Input media types and output formats.

use serde::{Deserialize, Serialize};

/// Target format for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG (lossy, no alpha).
    Jpeg,
    /// PNG (lossless).
    Png,
    /// WebP (lossy).
    Webp,
}

impl OutputFormat {
    /// All supported output formats.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Webp];

    /// Lowercase format name, also used as the file extension.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    /// Extension appended to derived filenames.
    #[inline]
    pub fn extension(self) -> &'static str {
        self.name()
    }

    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Whether the quality setting is meaningful for this format.
    pub fn is_lossy(self) -> bool {
        !matches!(self, OutputFormat::Png)
    }

    /// Quality used when the caller does not supply one.
    ///
    /// PNG is lossless and has no quality setting.
    pub fn default_quality(self) -> Option<f64> {
        match self {
            OutputFormat::Jpeg => Some(0.9),
            OutputFormat::Webp => Some(0.8),
            OutputFormat::Png => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared media types accepted as conversion input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMediaType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl InputMediaType {
    /// Parse a declared MIME type against the allow-list.
    ///
    /// Matching is case-insensitive and ignores parameters such as
    /// `; charset=binary`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(InputMediaType::Jpeg),
            "image/png" => Some(InputMediaType::Png),
            "image/webp" => Some(InputMediaType::Webp),
            "image/gif" => Some(InputMediaType::Gif),
            _ => None,
        }
    }
}
