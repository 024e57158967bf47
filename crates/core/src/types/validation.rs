//! Form validation shared by the write models.

use thiserror::Error;

/// A required-field or format check failed.
///
/// The message is shown to editors verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Create a validation error with an editor-facing message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The editor-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// ```rust
/// # use fino_integrino_core::parse_list;
/// assert_eq!(parse_list("Sesame, Poppy,, Chia "), vec!["Sesame", "Poppy", "Chia"]);
/// ```
#[must_use]
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Whether a field is empty once surrounding whitespace is removed.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Accepts absolute http(s) URLs and site-relative paths such as `/images/a.jpg`.
pub(crate) fn is_image_url(value: &str) -> bool {
    let value = value.trim();
    if value.starts_with('/') && !value.starts_with("//") {
        return true;
    }
    url::Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
