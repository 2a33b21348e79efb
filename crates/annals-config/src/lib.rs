//! Configuration management for Annals.
//!
//! This crate handles loading and validating the `annals.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, load_config};
pub use schema::{Config, HistoryConfig, RssConfig, SyncConfig};
