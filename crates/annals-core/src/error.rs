//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] annals_git::GitError),

    /// Plugin error.
    #[error("plugin error: {0}")]
    Plugin(#[from] annals_plugin::PluginError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] annals_config::ConfigError),

    /// A repository failed and the run is strict.
    #[error("repository {url} failed: {source}")]
    Repository {
        /// The repository URL.
        url: String,
        /// What went wrong.
        source: Box<CoreError>,
    },

    /// A `<history>` directive carries a value of the wrong type.
    #[error("invalid history directive: {0}")]
    InvalidDirective(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
