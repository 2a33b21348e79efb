//! Log queries through the system `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{GitError, GitResult};

/// Flags pinning the layout the scanner expects, whatever the user's
/// `log.*` and `format.*` settings say.
const OUTPUT_SHAPE: [&str; 5] = [
    "--date=iso",
    "--pretty=medium",
    "--no-abbrev-commit",
    "--no-decorate",
    "--no-color",
];

/// A history query against a local checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogQuery {
    /// Every commit touching one file, oldest first, with patches.
    FileHistory(PathBuf),

    /// The names of all tags.
    Tags,

    /// The full `git show` output of one tag.
    ShowTag(String),

    /// Every commit, oldest first, without patches.
    Commits {
        /// Whether merge commits are listed.
        include_merges: bool,
    },
}

impl LogQuery {
    /// Returns the git arguments for this query.
    fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        match self {
            Self::FileHistory(path) => {
                args.extend(["log", "--reverse", "--patch", "--no-ext-diff"].map(String::from));
                args.extend(OUTPUT_SHAPE.map(String::from));
                args.push("--".to_string());
                args.push(path.to_string_lossy().into_owned());
            }
            Self::Tags => args.push("tag".to_string()),
            Self::ShowTag(name) => {
                args.extend(["show", "--no-ext-diff"].map(String::from));
                args.extend(OUTPUT_SHAPE.map(String::from));
                args.push(format!("refs/tags/{name}"));
                args.push("--".to_string());
            }
            Self::Commits { include_merges } => {
                args.extend(["log", "--reverse"].map(String::from));
                args.extend(OUTPUT_SHAPE.map(String::from));
                if !include_merges {
                    args.push("--no-merges".to_string());
                }
            }
        }
        args
    }
}

/// Runs history queries against a checkout.
pub trait LogReader: Send + Sync {
    /// Runs the query and returns its decoded output.
    ///
    /// An empty string means the query produced nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be run or exits unsuccessfully.
    fn read(&self, repo: &Path, query: &LogQuery) -> GitResult<String>;

    /// Lists the tag names of a checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag query fails.
    fn tags(&self, repo: &Path) -> GitResult<Vec<String>> {
        let output = self.read(repo, &LogQuery::Tags)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Log reader backed by the system `git` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl SystemGit {
    /// Creates a new reader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates a git command with an isolated environment.
    ///
    /// Only `PATH` and `HOME` are inherited. Settings that change the shape
    /// of the output are overridden here or by the query flags.
    fn git_cmd(repo: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(repo);

        cmd.env_clear();
        if let Ok(path) = std::env::var("PATH") {
            cmd.env("PATH", path);
        }
        if let Ok(home) = std::env::var("HOME") {
            cmd.env("HOME", home);
        }

        cmd.args(["-c", "color.ui=false"]);
        cmd.args(["-c", "log.showSignature=false"]);
        cmd.args(["-c", "core.quotePath=false"]);
        cmd.args(["-c", "i18n.logOutputEncoding=UTF-8"]);

        cmd
    }
}

impl LogReader for SystemGit {
    fn read(&self, repo: &Path, query: &LogQuery) -> GitResult<String> {
        let args = query.args();
        let command = format!("git {}", args.join(" "));
        debug!(repo = %repo.display(), %command, "running git query");

        let output = Self::git_cmd(repo)
            .args(&args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: decode_output(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.is_empty() {
            debug!(%command, "query returned nothing");
        }

        Ok(decode_output(&output.stdout))
    }
}

/// Decodes raw command output.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, and CRLF line
/// endings are normalized to LF.
#[must_use]
pub fn decode_output(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text.into_owned()
    }
}
