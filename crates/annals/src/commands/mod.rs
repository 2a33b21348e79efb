//! Subcommands and the wiring they share.

pub mod apply;
pub mod init;
pub mod records;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use annals_config::{Config, ConfigError, find_and_load_config, load_config};
use annals_core::{Pipeline, PipelineOutcome};
use annals_git::{GitSync, SystemGit};
use annals_markdown::{CmarkHtml, HeadingShifter, MarkdownSections};
use annals_plugin::{HistoryRenderer, HistorySource, Template};
use annals_record::ReleaseRecord;
use annals_renderer_markdown::{MarkdownOptions, MarkdownRenderer};
use annals_renderer_rss::{RssChannel, RssRenderer};
use annals_source_changelog::ChangelogSource;
use annals_source_commits::CommitSource;
use annals_source_tags::TagSource;

/// Loads the configuration from `path`, or searches for one.
///
/// A missing `annals.toml` is not an error when searching: every field has
/// a default, so the defaults are used instead.
pub fn load(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(path)) => {
            debug!(?path, "no configuration file, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("failed to load configuration"),
    }
}

/// Creates the history source selected by `history.from`.
///
/// Returns `None` for an unknown source name.
pub fn create_source(config: &Config) -> Option<Box<dyn HistorySource>> {
    let history = &config.history;
    match history.from.as_str() {
        "changelog" => Some(Box::new(ChangelogSource::new(
            Box::new(SystemGit::new()),
            Box::new(MarkdownSections),
            &history.changelog,
            history.source_heading_level,
        ))),
        "tags" => Some(Box::new(TagSource::new(Box::new(SystemGit::new())))),
        "commits" => Some(Box::new(CommitSource::new(
            Box::new(SystemGit::new()),
            history.merge_commits,
        ))),
        other => {
            warn!(source = other, "unknown history source");
            None
        }
    }
}

/// Creates the pipeline described by the configuration.
pub fn create_pipeline(config: &Config) -> Pipeline {
    let history = &config.history;
    let mut pipeline = Pipeline::new(
        Box::new(GitSync::new(&config.sync.cache_dir)),
        create_source(config),
    )
    .with_revision(&history.revision)
    .strict(history.strict);

    if history.name_from_readme {
        pipeline = pipeline.with_readme_naming(&history.readme);
    }
    pipeline
}

/// Runs the pipeline over the configured repositories.
///
/// Failed repositories are summarized on stderr; their records are simply
/// missing from the result.
pub fn collect_records(config: &Config) -> Result<Vec<ReleaseRecord>> {
    let repos = &config.history.repos;
    if repos.is_empty() {
        warn!("no repositories configured");
    }

    let PipelineOutcome { records, failures } = create_pipeline(config)
        .run(repos)
        .context("failed to collect release history")?;

    if !failures.is_empty() {
        eprintln!(
            "{} of {} repositories failed:",
            failures.len(),
            repos.len()
        );
        for failure in &failures {
            eprintln!("  {failure}");
        }
    }

    info!(count = records.len(), "releases collected");
    Ok(records)
}

/// Creates the Markdown renderer described by the configuration.
pub fn markdown_renderer(config: &Config) -> MarkdownRenderer {
    let history = &config.history;
    MarkdownRenderer::new(
        MarkdownOptions {
            template: Template::parse(&history.target_heading_template),
            date_format: history.date_format,
            limit: history.limit,
            heading_level: history.target_heading_level,
        },
        Box::new(HeadingShifter),
    )
}

/// Creates the RSS renderer described by the configuration.
pub fn rss_renderer(config: &Config) -> RssRenderer {
    let rss = &config.rss;
    RssRenderer::new(
        RssChannel {
            title: rss.title.clone(),
            link: rss.link.clone(),
            description: rss.description.clone(),
            language: rss.language.clone(),
            file: rss.file.clone(),
            item_title: Template::parse(&rss.item_title_template),
            limit: rss.limit,
        },
        Box::new(CmarkHtml),
    )
}

/// The documents generated from one configuration.
#[derive(Debug)]
pub struct Generated {
    /// The Markdown history.
    pub markdown: String,

    /// The RSS feed, when enabled.
    pub rss: Option<String>,
}

/// Collects records once and renders every enabled output.
///
/// The feed sees the whole timeline; `history.limit` only bounds the
/// Markdown and `rss.limit` bounds the feed.
pub fn generate(config: &Config) -> Result<Generated> {
    let records = collect_records(config)?;

    let markdown = markdown_renderer(config)
        .render(&records)
        .context("failed to render Markdown history")?;

    let rss = if config.rss.enabled {
        if config.rss.link.is_empty() {
            warn!("rss.link is empty, feed links will be relative");
        }
        let feed = rss_renderer(config)
            .render(&records)
            .context("failed to render RSS feed")?;
        Some(feed)
    } else {
        None
    };

    Ok(Generated { markdown, rss })
}
