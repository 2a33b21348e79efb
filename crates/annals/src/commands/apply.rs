//! Apply command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use annals_core::process_directives;

use super::generate;

/// Arguments for the apply command.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Directory searched for Markdown files
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Runs the apply command.
pub fn run(args: &ApplyArgs, config_path: Option<&Path>) -> Result<()> {
    let base = super::load(config_path)?;
    let mut feed: Option<(String, String)> = None;
    let mut updated = 0;

    for path in markdown_files(&args.dir) {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let output = process_directives(&content, &base, |config| {
            let generated = generate(config)?;
            if let Some(rss) = generated.rss {
                feed = Some((config.rss.file.clone(), rss));
            }
            Ok::<_, anyhow::Error>(generated.markdown)
        })
        .with_context(|| format!("failed to process {}", path.display()))?;

        if output == content {
            debug!(path = %path.display(), "unchanged");
            continue;
        }

        fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "history updated");
        updated += 1;
    }

    if let Some((file, rss)) = feed {
        let path = args.dir.join(file);
        fs::write(&path, rss).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "feed written");
    }

    println!("Updated {updated} file(s)");
    Ok(())
}

/// Lists Markdown files under `dir`, skipping hidden directories.
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
