//! Changelog history source plugin.
//!
//! Every heading at the configured level of the current changelog is a
//! release. Its date is the date of the commit that first added that exact
//! heading line, and its description is the section under it.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use annals_git::scan::{LogEntry, parse_log};
use annals_git::{LogQuery, LogReader};
use annals_markdown::headings;
use annals_plugin::{HistorySource, Plugin, PluginResult, SectionExtractor};
use annals_record::{ReleaseRecord, RepoIdentity};
use tracing::debug;

/// Reads releases from changelog headings.
pub struct ChangelogSource {
    reader: Box<dyn LogReader>,
    sections: Box<dyn SectionExtractor>,
    changelog: PathBuf,
    heading_level: u8,
}

impl ChangelogSource {
    /// Creates a changelog source.
    ///
    /// `changelog` is relative to the checkout, and `heading_level` is the
    /// level of the headings that mark releases.
    #[must_use]
    pub fn new(
        reader: Box<dyn LogReader>,
        sections: Box<dyn SectionExtractor>,
        changelog: impl Into<PathBuf>,
        heading_level: u8,
    ) -> Self {
        Self {
            reader,
            sections,
            changelog: changelog.into(),
            heading_level,
        }
    }
}

impl Plugin for ChangelogSource {
    fn name(&self) -> &'static str {
        "changelog"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Dates changelog headings by the commit that introduced them"
    }
}

impl HistorySource for ChangelogSource {
    fn extract(&self, checkout: &Path, repo: &RepoIdentity) -> PluginResult<Vec<ReleaseRecord>> {
        let path = checkout.join(&self.changelog);
        if !path.is_file() {
            debug!(repo = %repo.url, path = %path.display(), "changelog not found");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let log = self
            .reader
            .read(checkout, &LogQuery::FileHistory(self.changelog.clone()))?;
        let entries = parse_log(&log);
        let introduced = introducing_dates(&entries);

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for heading in headings(&content).filter(|h| h.level == self.heading_level) {
            if !seen.insert(heading.content) {
                debug!(repo = %repo.url, heading = heading.content, "duplicate heading skipped");
                continue;
            }

            let Some(date) = introduced.get(heading.line) else {
                debug!(repo = %repo.url, heading = heading.content, "no introducing commit");
                continue;
            };

            let description = self
                .sections
                .extract_section(&path, heading.content, Some(1), true)?;
            records.push(ReleaseRecord::new(repo, heading.content, *date, description));
        }

        debug!(repo = %repo.url, count = records.len(), "changelog releases found");
        Ok(records)
    }
}

/// Maps every added line to the date of the oldest commit adding it.
///
/// Entries must be in chronological order.
fn introducing_dates<'a>(entries: &[LogEntry<'a>]) -> HashMap<&'a str, &'a str> {
    let mut dates = HashMap::new();
    for entry in entries {
        let Some(date) = entry.date else {
            continue;
        };
        for line in &entry.added {
            dates.entry(*line).or_insert(date);
        }
    }
    dates
}
