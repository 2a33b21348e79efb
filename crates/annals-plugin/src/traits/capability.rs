//! Markdown collaborators injected into sources and renderers.

use std::path::Path;

use crate::PluginResult;

/// Extracts the Markdown slice under one heading of a file.
pub trait SectionExtractor: Send + Sync {
    /// Returns the text between the heading whose content is `from_heading`
    /// and the next heading of the same or a shallower level.
    ///
    /// With `set_head_level`, the headings of the slice are shifted so the
    /// matched heading lands at that level. With `strip_heading`, the matched
    /// heading line is left out. A heading that is not found yields an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn extract_section(
        &self,
        file: &Path,
        from_heading: &str,
        set_head_level: Option<u8>,
        strip_heading: bool,
    ) -> PluginResult<String>;
}

/// Shifts the heading levels of a Markdown document.
pub trait HeadingRenumberer: Send + Sync {
    /// Shifts every heading so the shallowest one lands at `target_level`.
    fn renumber(&self, text: &str, target_level: u8) -> String;
}

/// Converts Markdown to HTML.
pub trait HtmlRenderer: Send + Sync {
    /// Renders a Markdown fragment as HTML.
    fn to_html(&self, markdown: &str) -> String;
}
