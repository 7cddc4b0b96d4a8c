//! Validation of uploaded feature files.
//!
//! Checks run in a fixed order: a `file` field must exist, its name must carry
//! a `.feature` extension, its size must stay within the configured limit, and
//! its content must be UTF-8. Only then is the text handed to extraction.

use axum::extract::Multipart;
use camino::Utf8Path;

use crate::error::ApiError;

/// Name of the multipart field carrying the feature file.
pub const FILE_FIELD: &str = "file";

const FEATURE_EXTENSION: &str = "feature";

const UTF8_BOM: char = '\u{feff}';

/// A validated feature file received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureUpload {
    filename: String,
    text: String,
}

impl FeatureUpload {
    /// Validate raw upload parts.
    ///
    /// # Examples
    /// ```
    /// use featuredoc_server::upload::FeatureUpload;
    ///
    /// let upload = FeatureUpload::from_parts("login.feature", b"Scenario: A\n  s1".to_vec(), 1024)
    ///     .unwrap();
    /// assert_eq!(upload.filename(), "login.feature");
    ///
    /// assert!(FeatureUpload::from_parts("login.txt", Vec::new(), 1024).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`ApiError::UnsupportedFileType`], [`ApiError::PayloadTooLarge`],
    /// or [`ApiError::InvalidEncoding`] when the corresponding check fails.
    pub fn from_parts(
        filename: impl Into<String>,
        content: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, ApiError> {
        let filename = filename.into();
        ensure_feature_name(&filename)?;
        if content.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge { limit: max_bytes });
        }
        let text = decode_text(content)?;
        Ok(Self { filename, text })
    }

    /// Read the `file` field from a multipart form and validate it.
    ///
    /// Other fields are skipped. The size limit is enforced while streaming so
    /// oversized files are rejected without being buffered in full.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingFile`] when no `file` field is present, any
    /// of the validation errors of [`from_parts`](Self::from_parts), or
    /// [`ApiError::Multipart`] when the form cannot be read.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_bytes: usize,
    ) -> Result<Self, ApiError> {
        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let filename = field.file_name().unwrap_or_default().to_owned();
            ensure_feature_name(&filename)?;

            let mut content = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if content.len().saturating_add(chunk.len()) > max_bytes {
                    return Err(ApiError::PayloadTooLarge { limit: max_bytes });
                }
                content.extend_from_slice(&chunk);
            }
            return Self::from_parts(filename, content, max_bytes);
        }
        Err(ApiError::MissingFile)
    }

    /// Client-supplied filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decoded feature text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Whether `filename` ends with a `.feature` extension (any ASCII case).
#[must_use]
pub fn is_feature_filename(filename: &str) -> bool {
    Utf8Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FEATURE_EXTENSION))
}

fn ensure_feature_name(filename: &str) -> Result<(), ApiError> {
    if is_feature_filename(filename) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedFileType(filename.to_owned()))
    }
}

fn decode_text(content: Vec<u8>) -> Result<String, ApiError> {
    let mut text = String::from_utf8(content).map_err(|_| ApiError::InvalidEncoding)?;
    if text.starts_with(UTF8_BOM) {
        text.remove(0);
    }
    Ok(text)
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("login.feature", true)]
    #[case("LOGIN.FEATURE", true)]
    #[case("nested/dir/login.Feature", true)]
    #[case("login.feature.txt", false)]
    #[case("login.features", false)]
    #[case("login", false)]
    #[case(".feature", false)]
    #[case("", false)]
    fn recognises_feature_filenames(#[case] filename: &str, #[case] expected: bool) {
        assert_eq!(is_feature_filename(filename), expected);
    }

    #[test]
    fn rejects_wrong_extension_before_size() {
        let err = FeatureUpload::from_parts("big.txt", vec![b'a'; 100], 10)
            .expect_err("extension is checked first");
        assert!(matches!(err, ApiError::UnsupportedFileType(name) if name == "big.txt"));
    }

    #[test]
    fn rejects_oversized_content() {
        let err = FeatureUpload::from_parts("big.feature", vec![b'a'; 11], 10)
            .expect_err("content exceeds limit");
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 10 }));
    }

    #[test]
    fn accepts_content_at_the_limit() {
        let upload = FeatureUpload::from_parts("ok.feature", vec![b'a'; 10], 10)
            .expect("content at limit is accepted");
        assert_eq!(upload.text(), "aaaaaaaaaa");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = FeatureUpload::from_parts("bad.feature", vec![0xff, 0xfe, 0x00], 10)
            .expect_err("invalid utf-8");
        assert!(matches!(err, ApiError::InvalidEncoding));
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut content = UTF8_BOM.to_string().into_bytes();
        content.extend_from_slice(b"Scenario: A");
        let upload =
            FeatureUpload::from_parts("bom.feature", content, 1024).expect("valid upload");
        assert_eq!(upload.text(), "Scenario: A");
    }
}
