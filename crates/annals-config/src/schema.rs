//! Configuration schema.

use annals_record::DateFormat;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// History generation.
    #[serde(default)]
    pub history: HistoryConfig,

    /// RSS feed output.
    #[serde(default)]
    pub rss: RssConfig,

    /// Repository synchronization.
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    /// Checks values that deserialize fine but are out of range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a heading level is outside 1..=6.
    pub fn validate(&self) -> ConfigResult<()> {
        check_level("source_heading_level", self.history.source_heading_level)?;
        check_level("target_heading_level", self.history.target_heading_level)
    }
}

fn check_level(field: &str, level: u8) -> ConfigResult<()> {
    if (1..=6).contains(&level) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be 1-6, got {level}"
        )))
    }
}

/// History generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Repository URLs or local paths, in output order.
    pub repos: Vec<String>,

    /// Branch, tag or commit to check out; empty means the default branch.
    pub revision: String,

    /// Data source: `changelog`, `tags` or `commits`.
    pub from: String,

    /// Changelog path relative to the checkout.
    pub changelog: String,

    /// README path relative to the checkout.
    pub readme: String,

    /// Take the repository name from the README's first heading.
    pub name_from_readme: bool,

    /// Include merge commits when reading from commits.
    pub merge_commits: bool,

    /// Changelog heading level that marks a release.
    pub source_heading_level: u8,

    /// Level of each release heading in the output.
    pub target_heading_level: u8,

    /// Release heading template.
    pub target_heading_template: String,

    /// How dates are shown in headings.
    pub date_format: DateFormat,

    /// Maximum number of releases shown; 0 shows all.
    pub limit: usize,

    /// Abort on the first failing repository.
    pub strict: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            revision: String::new(),
            from: "changelog".to_string(),
            changelog: "changelog.md".to_string(),
            readme: "README.md".to_string(),
            name_from_readme: false,
            merge_commits: true,
            source_heading_level: 1,
            target_heading_level: 1,
            target_heading_template: "[%date%] [%repo%](%link%) %version%".to_string(),
            date_format: DateFormat::YearFirst,
            limit: 0,
            strict: false,
        }
    }
}

/// RSS feed options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    /// Write a feed alongside the history.
    pub enabled: bool,

    /// Feed file name, also used for the self link.
    pub file: String,

    /// Channel title.
    pub title: String,

    /// Channel link.
    pub link: String,

    /// Channel description.
    pub description: String,

    /// Channel language.
    pub language: String,

    /// Item title template.
    pub item_title_template: String,

    /// Maximum number of items; 0 includes every release.
    pub limit: usize,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: "rss.xml".to_string(),
            title: "History of Releases".to_string(),
            link: String::new(),
            description: String::new(),
            language: "en-US".to_string(),
            item_title_template: "%repo% %version%".to_string(),
            limit: 0,
        }
    }
}

/// Repository synchronization options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Where remote repositories are cloned.
    pub cache_dir: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cache_dir: ".annals/repos".to_string(),
        }
    }
}
