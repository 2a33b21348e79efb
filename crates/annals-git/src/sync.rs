//! Working copy synchronization.

use std::path::{Path, PathBuf};

use git2::Repository as Git2Repo;
use git2::build::CheckoutBuilder;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

use crate::{GitError, GitResult};

/// Fetch refspecs used to refresh a cached clone.
const FETCH_REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

/// Makes a local working copy of a repository available.
pub trait RepoSync: Send + Sync {
    /// Ensures a working copy of `url` at `revision` exists and returns its path.
    ///
    /// An empty revision means the remote's default branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be cloned, fetched or checked out.
    fn sync(&self, url: &str, revision: &str) -> GitResult<PathBuf>;
}

/// Synchronizes repositories into a cache directory with libgit2.
#[derive(Debug, Clone)]
pub struct GitSync {
    cache_dir: PathBuf,
}

impl GitSync {
    /// Creates a synchronizer that clones into `cache_dir`.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Returns the checkout directory used for `url`.
    ///
    /// The URL hash keeps same-named repositories from different hosts apart.
    #[must_use]
    pub fn checkout_dir(&self, url: &str) -> PathBuf {
        let name: String = url
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', ':', '\\'])
            .next()
            .unwrap_or("repo")
            .trim_end_matches(".git")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.cache_dir
            .join(format!("{name}-{:016x}", xxh3_64(url.as_bytes())))
    }

    fn open_or_clone(&self, url: &str, dir: &Path) -> GitResult<Git2Repo> {
        if dir.join(".git").exists() {
            debug!(url, dir = %dir.display(), "fetching cached repository");
            let repo = Git2Repo::open(dir).map_err(|_| GitError::NotARepo(dir.to_path_buf()))?;
            {
                let mut remote = repo.find_remote("origin")?;
                remote.fetch(&FETCH_REFSPECS, None, None)?;
            }
            Ok(repo)
        } else {
            info!(url, dir = %dir.display(), "cloning repository");
            std::fs::create_dir_all(&self.cache_dir)?;
            Ok(Git2Repo::clone(url, dir)?)
        }
    }
}

impl RepoSync for GitSync {
    fn sync(&self, url: &str, revision: &str) -> GitResult<PathBuf> {
        let local = Path::new(url);
        if revision.is_empty()
            && local.is_dir()
            && let Ok(repo) = Git2Repo::open(local)
        {
            let path = repo.workdir().unwrap_or(local).to_path_buf();
            debug!(url, path = %path.display(), "using local repository in place");
            return Ok(path);
        }

        let dir = self.checkout_dir(url);
        let repo = self.open_or_clone(url, &dir)?;
        let commit = resolve_revision(&repo, revision)?;

        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head_detached(commit.id())?;
        info!(url, revision, commit = %commit.id(), "repository synchronized");

        Ok(dir)
    }
}

/// Resolves a revision to a commit, preferring remote branches.
fn resolve_revision<'r>(repo: &'r Git2Repo, revision: &str) -> GitResult<git2::Commit<'r>> {
    let candidates = if revision.is_empty() {
        vec!["refs/remotes/origin/HEAD".to_string(), "HEAD".to_string()]
    } else {
        vec![format!("refs/remotes/origin/{revision}"), revision.to_string()]
    };

    for candidate in &candidates {
        if let Ok(object) = repo.revparse_single(candidate) {
            return Ok(object.peel_to_commit()?);
        }
    }

    Err(GitError::RevisionNotFound(revision.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;
    use tempfile::TempDir;

    fn create_source_repo() -> (TempDir, Git2Repo) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        (temp_dir, repo)
    }

    fn commit_file(repo: &Git2Repo, file: &str, content: &str, message: &str) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(file), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Git2Repo, name: &str) {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight(name, head.as_object(), false).unwrap();
    }

    #[test]
    fn test_checkout_dir_is_stable_and_distinct() {
        let sync = GitSync::new("/cache");
        let first = sync.checkout_dir("https://a.example.com/org/app.git");
        let again = sync.checkout_dir("https://a.example.com/org/app.git");
        let other = sync.checkout_dir("https://b.example.com/org/app.git");

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert!(
            first
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("app-")
        );
        assert!(first.starts_with("/cache"));
    }

    #[test]
    fn test_local_repo_used_in_place() {
        let (source_dir, source) = create_source_repo();
        commit_file(&source, "a.txt", "a", "First commit");

        let cache = TempDir::new().unwrap();
        let sync = GitSync::new(cache.path());
        let url = source_dir.path().to_string_lossy().into_owned();

        let path = sync.sync(&url, "").unwrap();
        assert_eq!(
            path.canonicalize().unwrap(),
            source_dir.path().canonicalize().unwrap()
        );
        assert!(fs::read_dir(cache.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_sync_revision_clones_and_checks_out() {
        let (source_dir, source) = create_source_repo();
        commit_file(&source, "version.txt", "1", "First release");
        tag(&source, "v1");
        commit_file(&source, "version.txt", "2", "Second release");

        let cache = TempDir::new().unwrap();
        let sync = GitSync::new(cache.path());
        let url = source_dir.path().to_string_lossy().into_owned();

        let path = sync.sync(&url, "v1").unwrap();
        assert!(path.starts_with(cache.path()));
        assert_eq!(fs::read_to_string(path.join("version.txt")).unwrap(), "1");

        // A second sync reuses the clone and moves to the new revision.
        let head = source.head().unwrap().peel_to_commit().unwrap().id();
        let path = sync.sync(&url, &head.to_string()).unwrap();
        assert_eq!(fs::read_to_string(path.join("version.txt")).unwrap(), "2");
    }

    #[test]
    fn test_sync_unknown_revision() {
        let (source_dir, source) = create_source_repo();
        commit_file(&source, "a.txt", "a", "First commit");

        let cache = TempDir::new().unwrap();
        let sync = GitSync::new(cache.path());
        let url = source_dir.path().to_string_lossy().into_owned();

        let result = sync.sync(&url, "no-such-revision");
        assert!(matches!(result, Err(GitError::RevisionNotFound(_))));
    }

    #[test]
    fn test_sync_missing_remote_fails() {
        let cache = TempDir::new().unwrap();
        let sync = GitSync::new(cache.path());

        let result = sync.sync("/nonexistent/path/to/repo", "main");
        assert!(result.is_err());
    }
}
