//! Repository identity.

use serde::{Deserialize, Serialize};

/// The repository a release record came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoIdentity {
    /// The repository URL as configured.
    pub url: String,

    /// The display name of the repository.
    pub name: String,
}

impl RepoIdentity {
    /// Creates an identity whose name is derived from the URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = repo_name_from_url(&url);
        Self { url, name }
    }

    /// Replaces the derived name, e.g. with a README heading.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Derives a repository name from its URL.
///
/// Takes the last path segment and strips its extension, so
/// `https://github.com/org/project.git` becomes `project`.
#[must_use]
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches(['/', '\\']);
    let segment = trimmed
        .rsplit(['/', ':', '\\'])
        .next()
        .unwrap_or(trimmed);

    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => segment.to_string(),
    }
}
