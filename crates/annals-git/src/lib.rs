//! Git layer for Annals.
//!
//! This crate provides everything that touches a repository:
//! - Log queries through the system `git` binary ([`SystemGit`])
//! - A line-classifying scanner for `git log` and `git show` output
//! - Working copy synchronization through libgit2 ([`GitSync`])

mod error;
mod reader;
pub mod scan;
mod sync;

pub use error::{GitError, GitResult};
pub use reader::{LogQuery, LogReader, SystemGit, decode_output};
pub use sync::{GitSync, RepoSync};
