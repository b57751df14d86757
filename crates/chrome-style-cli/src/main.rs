//! chrome-style CLI tool.
//!
//! Usage:
//! ```bash
//! chrome-style check [OPTIONS] <PATH>
//! chrome-style classify <PATH>...
//! chrome-style show-policy
//! chrome-style init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Source-location classifier for Chromium-style C++ checks
#[derive(Parser)]
#[command(name = "chrome-style")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip filesystem path resolution
    #[arg(long, global = true)]
    no_realpath: bool,

    /// Report check findings as errors
    #[arg(long, global = true)]
    warnings_as_errors: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check translation-unit snapshots
    Check {
        /// Snapshot file, or directory searched for `*.json` snapshots
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Classify file paths into zones
    Classify {
        /// Paths as the compiler would report them
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the effective policy and options
    ShowPolicy,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

/// Flags shared by every command that builds a checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--no-realpath` was given.
    pub no_realpath: bool,
    /// `--warnings-as-errors` was given.
    pub warnings_as_errors: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        no_realpath: cli.no_realpath,
        warnings_as_errors: cli.warnings_as_errors,
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check { path, format } => {
            commands::check::run(&path, format, config_path, overrides)
        }
        Commands::Classify { paths } => commands::classify::run(&paths, config_path, overrides),
        Commands::ShowPolicy => commands::show_policy::run(config_path, overrides),
        Commands::Init { force } => commands::init::run(force),
    }
}
