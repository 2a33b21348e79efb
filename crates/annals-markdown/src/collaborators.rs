//! Plugin capability implementations.

use std::fs;
use std::path::Path;

use annals_plugin::{HeadingRenumberer, HtmlRenderer, PluginResult, SectionExtractor};

use crate::{extract_section, renumber_headings, to_html};

/// Extracts sections from Markdown files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSections;

impl SectionExtractor for MarkdownSections {
    fn extract_section(
        &self,
        file: &Path,
        from_heading: &str,
        set_head_level: Option<u8>,
        strip_heading: bool,
    ) -> PluginResult<String> {
        let text = fs::read_to_string(file)?;
        Ok(extract_section(
            &text,
            from_heading,
            set_head_level,
            strip_heading,
        ))
    }
}

/// Renumbers headings in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingShifter;

impl HeadingRenumberer for HeadingShifter {
    fn renumber(&self, text: &str, target_level: u8) -> String {
        renumber_headings(text, target_level)
    }
}

/// Renders HTML with `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkHtml;

impl HtmlRenderer for CmarkHtml {
    fn to_html(&self, markdown: &str) -> String {
        to_html(markdown)
    }
}
