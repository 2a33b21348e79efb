//! Plugin error types.

use annals_git::GitError;
use thiserror::Error;

/// Plugin-related errors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A history query failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Rendering failed.
    #[error("render failed: {0}")]
    Render(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
