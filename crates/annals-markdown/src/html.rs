//! Markdown to HTML.

use pulldown_cmark::{Options, Parser, html};

/// Renders Markdown as HTML.
///
/// Enabled extensions:
/// - Tables
/// - Strikethrough
/// - Footnotes
#[must_use]
pub fn to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}
