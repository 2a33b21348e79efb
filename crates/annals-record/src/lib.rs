//! Release record types for Annals.
//!
//! This crate provides the types shared by every stage of history generation:
//! - [`ReleaseRecord`]: One release event, whatever source it was mined from
//! - [`ReleaseDate`]: The event timestamp, kept verbatim and reformatted on demand
//! - [`RepoIdentity`]: The origin repository of a record

mod date;
mod record;
mod repo;

pub use date::{DateFormat, ReleaseDate};
pub use record::ReleaseRecord;
pub use repo::{RepoIdentity, repo_name_from_url};
