//! Render command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use super::generate;

/// History source argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceArg {
    /// Sections of a changelog file
    Changelog,
    /// Annotated and lightweight tags
    Tags,
    /// Individual commits
    Commits,
}

impl SourceArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Changelog => "changelog",
            Self::Tags => "tags",
            Self::Commits => "commits",
        }
    }
}

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Repository URL or path; replaces the configured list (repeatable)
    #[arg(long = "repo", value_name = "URL")]
    pub repos: Vec<String>,

    /// Where releases are read from
    #[arg(long, value_enum)]
    pub from: Option<SourceArg>,

    /// Maximum number of releases (0 shows all)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Runs the render command.
pub fn run(args: RenderArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load(config_path)?;
    if !args.repos.is_empty() {
        config.history.repos = args.repos;
    }
    if let Some(from) = args.from {
        config.history.from = from.as_str().to_string();
    }
    if let Some(limit) = args.limit {
        config.history.limit = limit;
    }

    let generated = generate(&config)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &generated.markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "history written");
        }
        None => print!("{}", generated.markdown),
    }

    if let Some(feed) = generated.rss {
        let dir = args
            .output
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        let path = dir.join(&config.rss.file);
        fs::write(&path, feed).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "feed written");
    }

    Ok(())
}
