//! Records command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use super::collect_records;

/// Arguments for the records command.
#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// Pretty-print the JSON
    #[arg(short, long)]
    pub pretty: bool,
}

/// Runs the records command.
pub fn run(args: &RecordsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load(config_path)?;
    let records = collect_records(&config)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
    .context("failed to serialize records")?;

    println!("{json}");
    Ok(())
}
