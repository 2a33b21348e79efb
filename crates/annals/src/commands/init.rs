//! Initialize command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use annals_config::{CONFIG_FILE_NAME, Config};

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

const HEADER: &str = "\
# Annals configuration.
#
# List the repositories under [history] and run `annals render`.
# Heading templates accept %date%, %repo%, %link% and %version%.

";

/// Renders the default configuration file.
fn default_config() -> Result<String> {
    let body =
        toml::to_string_pretty(&Config::default()).context("failed to serialize configuration")?;
    Ok(format!("{HEADER}{body}"))
}

/// Runs the init command.
pub fn run(args: &InitArgs, config_path: Option<&Path>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(path, default_config()?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "configuration written");
    println!("Created {}", path.display());

    Ok(())
}
