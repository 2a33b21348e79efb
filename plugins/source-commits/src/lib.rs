//! Commit log history source plugin.

use std::path::Path;

use annals_git::scan::parse_log;
use annals_git::{LogQuery, LogReader};
use annals_plugin::{HistorySource, Plugin, PluginResult};
use annals_record::{ReleaseRecord, RepoIdentity};
use tracing::debug;

/// Reads one release per commit, labelled with the short commit id.
pub struct CommitSource {
    reader: Box<dyn LogReader>,
    include_merges: bool,
}

impl CommitSource {
    /// Creates a commit source.
    #[must_use]
    pub fn new(reader: Box<dyn LogReader>, include_merges: bool) -> Self {
        Self {
            reader,
            include_merges,
        }
    }
}

impl Plugin for CommitSource {
    fn name(&self) -> &'static str {
        "commits"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Reads releases from individual commits"
    }
}

impl HistorySource for CommitSource {
    fn extract(&self, checkout: &Path, repo: &RepoIdentity) -> PluginResult<Vec<ReleaseRecord>> {
        let log = self.reader.read(
            checkout,
            &LogQuery::Commits {
                include_merges: self.include_merges,
            },
        )?;

        let records: Vec<ReleaseRecord> = parse_log(&log)
            .into_iter()
            .filter_map(|entry| {
                let Some(date) = entry.date else {
                    debug!(repo = %repo.url, commit = entry.id, "commit without date skipped");
                    return None;
                };
                Some(ReleaseRecord::new(
                    repo,
                    entry.short_id(),
                    date,
                    entry.message_text(),
                ))
            })
            .collect();

        debug!(repo = %repo.url, count = records.len(), "commits read");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annals_git::GitResult;

    /// Filters a canned log the way `--no-merges` would.
    struct FakeLog;

    const FIRST: &str = "\
commit aaaaaaaa11111111111111111111111111111111
Author: Dev <dev@example.com>
Date:   2024-01-01 10:00:00 +0000

    First commit
";

    const SECOND: &str = "\
commit bbbbbbbb22222222222222222222222222222222
Author: Dev <dev@example.com>
Date:   2024-01-02 10:00:00 +0000

    Second commit

    Date: 1999-01-01 is quoted in the body
    commit cccccccc33333333333333333333333333333333 is mentioned too
";

    const MERGE: &str = "\
commit dddddddd44444444444444444444444444444444
Merge: aaaaaaaa bbbbbbbb
Author: Dev <dev@example.com>
Date:   2024-01-03 10:00:00 +0000

    Merge branch 'feature'
";

    impl LogReader for FakeLog {
        fn read(&self, _repo: &Path, query: &LogQuery) -> GitResult<String> {
            match query {
                LogQuery::Commits { include_merges } => {
                    let mut log = format!("{FIRST}\n{SECOND}");
                    if *include_merges {
                        log.push('\n');
                        log.push_str(MERGE);
                    }
                    Ok(log)
                }
                _ => Ok(String::new()),
            }
        }
    }

    fn repo() -> RepoIdentity {
        RepoIdentity::from_url("https://example.com/org/app.git")
    }

    #[test]
    fn test_merges_excluded() {
        let source = CommitSource::new(Box::new(FakeLog), false);
        let records = source.extract(Path::new("."), &repo()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_merges_included() {
        let source = CommitSource::new(Box::new(FakeLog), true);
        let records = source.extract(Path::new("."), &repo()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].description, "Merge branch 'feature'");
    }

    #[test]
    fn test_record_fields() {
        let source = CommitSource::new(Box::new(FakeLog), false);
        let records = source.extract(Path::new("."), &repo()).unwrap();

        assert_eq!(records[0].version, "aaaaaaaa");
        assert_eq!(records[0].date.as_str(), "2024-01-01 10:00:00 +0000");
        assert_eq!(records[0].description, "First commit");
        assert_eq!(records[0].repo_name, "app");
    }

    #[test]
    fn test_body_lookalikes_do_not_split() {
        let source = CommitSource::new(Box::new(FakeLog), false);
        let records = source.extract(Path::new("."), &repo()).unwrap();

        assert_eq!(records[1].version, "bbbbbbbb");
        assert_eq!(records[1].date.as_str(), "2024-01-02 10:00:00 +0000");
        assert_eq!(
            records[1].description,
            "Second commit\n\nDate: 1999-01-01 is quoted in the body\n\
             commit cccccccc33333333333333333333333333333333 is mentioned too"
        );
    }

    #[test]
    fn test_empty_log() {
        struct EmptyLog;

        impl LogReader for EmptyLog {
            fn read(&self, _repo: &Path, _query: &LogQuery) -> GitResult<String> {
                Ok(String::new())
            }
        }

        let source = CommitSource::new(Box::new(EmptyLog), true);
        assert!(source.extract(Path::new("."), &repo()).unwrap().is_empty());
    }
}
