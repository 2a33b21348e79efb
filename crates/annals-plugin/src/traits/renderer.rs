//! History renderer trait.

use annals_record::ReleaseRecord;

use super::Plugin;
use crate::PluginResult;

/// Renders a sorted record list into a document.
pub trait HistoryRenderer: Plugin {
    /// Renders the records, which are already in display order.
    ///
    /// An empty list renders to whatever the format considers empty, never
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be produced.
    fn render(&self, records: &[ReleaseRecord]) -> PluginResult<String>;

    /// Returns the file extension for the output (e.g., "md").
    fn extension(&self) -> &'static str {
        "md"
    }
}
