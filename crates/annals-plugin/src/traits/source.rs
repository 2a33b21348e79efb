//! History source trait.

use std::path::Path;

use annals_record::{ReleaseRecord, RepoIdentity};

use super::Plugin;
use crate::PluginResult;

/// Mines release records from a repository checkout.
///
/// Entries that cannot be resolved to a version, a date and a description
/// are skipped; only failures of the underlying queries are errors.
pub trait HistorySource: Plugin {
    /// Extracts the release records of one repository.
    ///
    /// `checkout` is the local working copy and `repo` the identity stamped
    /// on every record.
    ///
    /// # Errors
    ///
    /// Returns an error if a history query fails.
    fn extract(&self, checkout: &Path, repo: &RepoIdentity) -> PluginResult<Vec<ReleaseRecord>>;
}
