//! Git tag history source plugin.

use std::path::Path;

use annals_git::scan::{ShowOutput, parse_show};
use annals_git::{LogQuery, LogReader};
use annals_plugin::{HistorySource, Plugin, PluginResult};
use annals_record::{ReleaseRecord, RepoIdentity};
use tracing::debug;

/// Reads one release per tag.
///
/// Annotated tags use their own date and annotation; lightweight tags fall
/// back to the commit they point at.
pub struct TagSource {
    reader: Box<dyn LogReader>,
}

impl TagSource {
    /// Creates a tag source.
    #[must_use]
    pub fn new(reader: Box<dyn LogReader>) -> Self {
        Self { reader }
    }

    fn record(
        &self,
        checkout: &Path,
        repo: &RepoIdentity,
        tag: &str,
    ) -> PluginResult<Option<ReleaseRecord>> {
        let output = self
            .reader
            .read(checkout, &LogQuery::ShowTag(tag.to_string()))?;

        let record = match parse_show(&output, tag) {
            Some(ShowOutput::AnnotatedTag {
                name,
                date,
                annotation,
            }) => Some(ReleaseRecord::new(
                repo,
                name,
                date,
                annotation.join("\n").trim(),
            )),
            Some(ShowOutput::Commit(entry)) => entry
                .date
                .map(|date| ReleaseRecord::new(repo, tag, date, entry.message_text())),
            None => None,
        };

        if record.is_none() {
            debug!(repo = %repo.url, tag, "tag output not recognized");
        }
        Ok(record)
    }
}

impl Plugin for TagSource {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Reads releases from annotated and lightweight tags"
    }
}

impl HistorySource for TagSource {
    fn extract(&self, checkout: &Path, repo: &RepoIdentity) -> PluginResult<Vec<ReleaseRecord>> {
        let tags = self.reader.tags(checkout)?;
        debug!(repo = %repo.url, count = tags.len(), "tags listed");

        let mut records = Vec::new();
        for tag in &tags {
            if let Some(record) = self.record(checkout, repo, tag)? {
                records.push(record);
            }
        }

        Ok(records)
    }
}
