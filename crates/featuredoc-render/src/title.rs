//! Document titles derived from uploaded filenames.

use std::fmt;

use camino::Utf8Path;

/// Title used when a filename has no usable stem.
const FALLBACK_TITLE: &str = "Feature";

/// Title of a rendered document.
///
/// # Examples
/// ```
/// use featuredoc_render::DocumentTitle;
///
/// let title = DocumentTitle::from_filename("features/login.feature");
/// assert_eq!(title.as_str(), "login");
/// assert_eq!(title.docx_filename(), "login.docx");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentTitle(String);

impl DocumentTitle {
    /// Use the supplied text verbatim as the title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Derive a title from a filename by dropping directories and extension.
    ///
    /// Both `/` and `\` are treated as separators since browsers on Windows
    /// may submit full client-side paths.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let stem = Utf8Path::new(base)
            .file_stem()
            .map(str::trim)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(FALLBACK_TITLE);
        Self(stem.to_owned())
    }

    /// Borrow the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename offered when the rendered document is downloaded.
    #[must_use]
    pub fn docx_filename(&self) -> String {
        format!("{}.docx", self.0)
    }
}

impl AsRef<str> for DocumentTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
