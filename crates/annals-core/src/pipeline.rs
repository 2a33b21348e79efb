//! Per-repository history extraction.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use annals_markdown::first_heading;
use annals_plugin::{HistorySource, RepoSync};
use annals_record::{ReleaseRecord, RepoIdentity};
use tracing::{debug, error, info, warn};

use crate::{CoreError, CoreResult, aggregate};

/// A repository that could not be processed.
#[derive(Debug)]
pub struct RepoFailure {
    /// The repository URL.
    pub url: String,

    /// What went wrong.
    pub error: CoreError,
}

impl fmt::Display for RepoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.error)
    }
}

/// The result of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// All records, newest first.
    pub records: Vec<ReleaseRecord>,

    /// Repositories that failed and were left out.
    pub failures: Vec<RepoFailure>,
}

/// Runs sync and extraction over a list of repositories.
///
/// Repositories are processed one after another. Unless the pipeline is
/// strict, a failing repository is reported in the outcome and the rest are
/// still processed.
pub struct Pipeline {
    sync: Box<dyn RepoSync>,
    source: Option<Box<dyn HistorySource>>,
    revision: String,
    readme: Option<PathBuf>,
    strict: bool,
}

impl Pipeline {
    /// Creates a pipeline.
    ///
    /// Without a source, runs produce no records.
    #[must_use]
    pub fn new(sync: Box<dyn RepoSync>, source: Option<Box<dyn HistorySource>>) -> Self {
        Self {
            sync,
            source,
            revision: String::new(),
            readme: None,
            strict: false,
        }
    }

    /// Sets the revision checked out in every repository.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Names repositories after the first heading of this README path.
    #[must_use]
    pub fn with_readme_naming(mut self, readme: impl Into<PathBuf>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    /// Makes the first failing repository abort the run.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Processes every repository and returns the sorted timeline.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first repository failure.
    pub fn run(&self, repos: &[String]) -> CoreResult<PipelineOutcome> {
        let Some(source) = self.source.as_deref() else {
            warn!("unsupported data source, no history generated");
            return Ok(PipelineOutcome::default());
        };

        let mut lists = Vec::with_capacity(repos.len());
        let mut failures = Vec::new();

        for url in repos {
            match self.process_repo(source, url) {
                Ok(records) => {
                    info!(
                        repo = %url,
                        source = source.name(),
                        count = records.len(),
                        "history extracted"
                    );
                    lists.push(records);
                }
                Err(err) if self.strict => {
                    return Err(CoreError::Repository {
                        url: url.clone(),
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    error!(repo = %url, error = %err, "repository skipped");
                    failures.push(RepoFailure {
                        url: url.clone(),
                        error: err,
                    });
                }
            }
        }

        Ok(PipelineOutcome {
            records: aggregate(lists),
            failures,
        })
    }

    fn process_repo(
        &self,
        source: &dyn HistorySource,
        url: &str,
    ) -> CoreResult<Vec<ReleaseRecord>> {
        let checkout = self.sync.sync(url, &self.revision)?;
        debug!(repo = %url, path = %checkout.display(), "repository ready");

        let identity = self.identify(url, &checkout)?;
        Ok(source.extract(&checkout, &identity)?)
    }

    fn identify(&self, url: &str, checkout: &Path) -> CoreResult<RepoIdentity> {
        let identity = RepoIdentity::from_url(url);
        let Some(readme) = &self.readme else {
            return Ok(identity);
        };

        let path = checkout.join(readme);
        if !path.is_file() {
            debug!(repo = %url, path = %path.display(), "README not found");
            return Ok(identity);
        }

        match first_heading(&fs::read_to_string(&path)?) {
            Some(name) => {
                debug!(repo = %url, name = %name, "name taken from README");
                Ok(identity.with_name(name))
            }
            None => Ok(identity),
        }
    }
}
