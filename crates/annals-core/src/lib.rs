//! Core library for Annals.
//!
//! This crate provides the orchestration around the plugins:
//! - [`Pipeline`]: sync, name and extract every configured repository
//! - [`sort_records`]: the aggregate timeline order
//! - [`process_directives`]: `<history>` tags in host documents

mod aggregate;
mod directive;
mod error;
mod pipeline;

pub use aggregate::{aggregate, sort_records};
pub use directive::{Directive, apply_attributes, find_directives, process_directives};
pub use error::{CoreError, CoreResult};
pub use pipeline::{Pipeline, PipelineOutcome, RepoFailure};
