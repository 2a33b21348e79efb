//! Markdown history renderer plugin.
//!
//! Each record becomes a heading built from the heading template, followed
//! by its description. The document is assembled at level 1 and then shifted
//! to the configured heading level.

use annals_plugin::{
    HeadingRenumberer, HistoryRenderer, Plugin, PluginResult, Template, TemplateValues,
};
use annals_record::{DateFormat, ReleaseRecord};

/// Markdown renderer options.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Release heading template.
    pub template: Template,

    /// How dates are shown in headings.
    pub date_format: DateFormat,

    /// Maximum number of records; 0 renders all.
    pub limit: usize,

    /// Level of each release heading.
    pub heading_level: u8,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            template: Template::default(),
            date_format: DateFormat::YearFirst,
            limit: 0,
            heading_level: 1,
        }
    }
}

/// Renders records as a heading-per-release Markdown document.
pub struct MarkdownRenderer {
    options: MarkdownOptions,
    renumberer: Box<dyn HeadingRenumberer>,
}

impl MarkdownRenderer {
    /// Creates a Markdown renderer.
    #[must_use]
    pub fn new(options: MarkdownOptions, renumberer: Box<dyn HeadingRenumberer>) -> Self {
        Self {
            options,
            renumberer,
        }
    }

    fn heading(&self, record: &ReleaseRecord) -> String {
        let date = record.date.display(self.options.date_format);
        self.options.template.render(&TemplateValues {
            date: &date,
            repo: &record.repo_name,
            link: &record.repo_url,
            version: &record.version,
        })
    }
}

impl Plugin for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Renders the release history as Markdown"
    }
}

impl HistoryRenderer for MarkdownRenderer {
    fn render(&self, records: &[ReleaseRecord]) -> PluginResult<String> {
        let limit = match self.options.limit {
            0 => records.len(),
            n => n,
        };

        let mut document = String::new();
        for record in records.iter().take(limit) {
            document.push_str("# ");
            document.push_str(&self.heading(record));
            document.push_str("\n\n");

            let description = body(&record.description);
            if !description.is_empty() {
                document.push_str(description);
                document.push_str("\n\n");
            }
        }

        if document.is_empty() {
            return Ok(document);
        }

        Ok(self
            .renumberer
            .renumber(&document, self.options.heading_level))
    }
}

/// Drops trailing whitespace and leading blank lines.
///
/// Indentation of the first content line is kept: an indented `#` line
/// must not turn into a heading.
fn body(description: &str) -> &str {
    let text = description.trim_end();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &text[start..]
}
