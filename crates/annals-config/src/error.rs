//! Errors raised while reading `annals.toml`.

use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `annals.toml` at the given path, or in any parent of the search start.
    #[error("no configuration at {}", .0.display())]
    NotFound(PathBuf),

    /// The file is not valid TOML or does not match the schema.
    #[error("cannot parse configuration: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("bad configuration value: {0}")]
    Invalid(String),

    /// The file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the config crate.
pub type ConfigResult<T> = Result<T, ConfigError>;
