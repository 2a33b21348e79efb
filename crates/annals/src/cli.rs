//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Merge release histories from many Git repositories into one timeline.
#[derive(Debug, Parser)]
#[command(name = "annals")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: annals.toml in this or a parent directory)
    #[arg(short, long, global = true, env = "ANNALS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default annals.toml
    Init(commands::init::InitArgs),

    /// Render the release history as Markdown
    Render(commands::render::RenderArgs),

    /// Replace <history> directives in Markdown files
    Apply(commands::apply::ApplyArgs),

    /// Print the sorted release records as JSON
    Records(commands::records::RecordsArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Init(args) => commands::init::run(&args, config),
            Commands::Render(args) => commands::render::run(args, config),
            Commands::Apply(args) => commands::apply::run(&args, config),
            Commands::Records(args) => commands::records::run(&args, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["annals", "render", "--verbose", "-c", "x.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_render_repeated_repo() {
        let cli = Cli::try_parse_from([
            "annals", "render", "--repo", "a", "--repo", "b", "--from", "tags", "--limit", "3",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.repos, vec!["a", "b"]);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn test_render_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["annals", "render", "--from", "releases"]).is_err());
    }
}
