//! Input files and the validator that gates them.

use crate::convert::ConvertError;
use crate::format::InputMediaType;

/// A file handed in for conversion: its name, declared media type and bytes.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The media type declared by the caller, not sniffed from the bytes.
    #[inline]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Whether a declared media type and size pass the allow-list check.
///
/// Shared by [`is_valid_image`] and callers that only hold file metadata.
pub fn is_accepted(media_type: &str, size: u64) -> bool {
    size > 0 && InputMediaType::from_mime(media_type).is_some()
}

/// Whether `file` declares an accepted image type (JPEG, PNG, WebP, GIF)
/// and is non-empty.
pub fn is_valid_image(file: &InputFile) -> bool {
    is_accepted(file.media_type(), file.size() as u64)
}

/// Like [`is_valid_image`], but explains a rejection.
pub fn validate(file: &InputFile) -> Result<InputMediaType, ConvertError> {
    let media_type = InputMediaType::from_mime(file.media_type()).ok_or_else(|| {
        ConvertError::InvalidInput(format!(
            "unsupported media type {:?}",
            file.media_type()
        ))
    })?;

    if file.size() == 0 {
        return Err(ConvertError::InvalidInput("file is empty".to_string()));
    }

    Ok(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ["image/jpeg", "image/png", "image/webp", "image/gif"] {
            let file = InputFile::new("a", mime, vec![1]);
            assert!(is_valid_image(&file), "{} should be accepted", mime);
            assert!(validate(&file).is_ok());
        }
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/bmp", "image/svg+xml", "text/plain", ""] {
            let file = InputFile::new("a", mime, vec![1, 2, 3]);
            assert!(!is_valid_image(&file), "{} should be rejected", mime);
            assert!(matches!(validate(&file), Err(ConvertError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_rejects_empty_file() {
        let file = InputFile::new("empty.png", "image/png", Vec::new());
        assert!(!is_valid_image(&file));

        let err = validate(&file).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: file is empty");
    }

    #[test]
    fn test_validation_trusts_declared_type() {
        // Bytes are not inspected here; decode catches mismatches
        let file = InputFile::new("fake.png", "image/png", b"not a png".to_vec());
        assert!(is_valid_image(&file));
    }

    #[test]
    fn test_is_accepted() {
        assert!(is_accepted("image/webp", 10));
        assert!(!is_accepted("image/webp", 0));
        assert!(!is_accepted("application/pdf", 10));
    }

    #[test]
    fn test_accessors() {
        let file = InputFile::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8]);
        assert_eq!(file.name(), "photo.jpg");
        assert_eq!(file.media_type(), "image/jpeg");
        assert_eq!(file.bytes(), &[0xFF, 0xD8]);
        assert_eq!(file.size(), 2);
    }
}
