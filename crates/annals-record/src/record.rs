//! Release record type.

use serde::{Deserialize, Serialize};

use crate::{ReleaseDate, RepoIdentity};

/// One release event mined from a repository.
///
/// Records are built once by a history source and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// When the release happened.
    pub date: ReleaseDate,

    /// The origin repository URL.
    pub repo_url: String,

    /// The origin repository display name.
    pub repo_name: String,

    /// The release label: a changelog heading, a tag name or a short commit id.
    pub version: String,

    /// The Markdown body of the release.
    pub description: String,
}

impl ReleaseRecord {
    /// Creates a new record for the given repository.
    #[must_use]
    pub fn new(
        repo: &RepoIdentity,
        version: impl Into<String>,
        date: impl Into<ReleaseDate>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            repo_url: repo.url.clone(),
            repo_name: repo.name.clone(),
            version: version.into(),
            description: description.into(),
        }
    }
}
