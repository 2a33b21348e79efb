//! Locating and reading `annals.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Name of the file searched for by [`find_and_load_config`].
pub const CONFIG_FILE_NAME: &str = "annals.toml";

/// Reads, parses and validates the configuration at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the file does not exist, and
/// the parse or range error otherwise.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading configuration");

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let config: Config = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Loads the nearest `annals.toml`, starting in the working directory.
///
/// # Errors
///
/// See [`find_and_load_config_from`].
pub fn find_and_load_config() -> ConfigResult<Config> {
    find_and_load_config_from(std::env::current_dir()?)
}

/// Loads the nearest `annals.toml` in `start_dir` or one of its ancestors.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] naming `start_dir/annals.toml` when no
/// ancestor has one, or the error from [`load_config`] for the file found.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    let start_dir = start_dir.as_ref();
    match start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
    {
        Some(path) => load_config(path),
        None => Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME))),
    }
}
