//! Askama filters for the page templates.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Path of the fingerprinted stylesheet written by the build script.
const STYLESHEET: &str = concat!("/static/css/derived/main.", env!("CSS_HASH"), ".css");

/// Year for the footer copyright line.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Usage in templates: `{{ ""|stylesheet }}`
#[askama::filter_fn]
pub fn stylesheet(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(STYLESHEET)
}

/// Link that highlights a section in the nav and scrolls to it.
///
/// Usage in templates: `{{ "partnership"|section_link }}`
#[askama::filter_fn]
pub fn section_link(section: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("/?section={section}#{section}"))
}
