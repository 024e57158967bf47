//! Markdown rendering for long-form section text.

use comrak::{Options, markdown_to_html};

/// Render markdown to HTML with GFM extensions.
///
/// Raw HTML in the source is omitted from the output.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.extension.footnotes = true;

    markdown_to_html(content, &options)
}
