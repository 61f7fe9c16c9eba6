//! hookforge CLI tool.
//!
//! Usage:
//! ```bash
//! hookforge scan [PATH]
//! hookforge generate [PATH] [--output FILE] [--force]
//! hookforge check-exports [LIBS...]
//! hookforge init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Technology detection and pre-commit configuration generator
#[derive(Parser)]
#[command(name = "hookforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (default: hookforge.toml in the target directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect technologies in a repository
    Scan {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Detect technologies and write a .pre-commit-config.yaml
    Generate {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file ("-" for stdout; default: <path>/.pre-commit-config.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Only include technologies at or above this confidence
        #[arg(long, env = "HOOKFORGE_MIN_CONFIDENCE")]
        min_confidence: Option<f64>,
    },

    /// Validate Python library export/import boundaries
    CheckExports {
        /// Library paths to validate
        libraries: Vec<PathBuf>,

        /// Exclude call-site file patterns (repeatable or comma-separated)
        #[arg(short, long, env = "HOOKFORGE_EXCLUDE")]
        exclude: Vec<String>,

        /// Submodules consumers may import from directly (comma-separated)
        #[arg(long, env = "HOOKFORGE_PUBLIC_SUBMODULES", value_delimiter = ',')]
        public_submodules: Vec<String>,

        /// Fail only when error-class violations exceed this number
        #[arg(long, env = "HOOKFORGE_MAX_VIOLATIONS")]
        max_violations: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Suppress the success message
        #[arg(short, long)]
        quiet: bool,
    },

    /// List available hooks, optionally for one technology
    ListHooks {
        /// Technology name (e.g. "python")
        technology: Option<String>,
    },

    /// Initialize a hookforge.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-entry compact format.
    Compact,
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

    match cli.command {
        Commands::Scan { path, format } => {
            let file_config = config::load(cli.config.as_deref(), &path)?;
            commands::scan::run(&path, format, &file_config)
        }
        Commands::Generate {
            path,
            output,
            force,
            min_confidence,
        } => {
            let file_config = config::load(cli.config.as_deref(), &path)?;
            commands::generate::run(&path, output, force, min_confidence, &file_config)
        }
        Commands::CheckExports {
            libraries,
            exclude,
            public_submodules,
            max_violations,
            format,
            quiet,
        } => {
            let cwd = PathBuf::from(".");
            let file_config = config::load(cli.config.as_deref(), &cwd)?;
            commands::check_exports::run(commands::check_exports::Args {
                libraries,
                exclude,
                public_submodules,
                max_violations,
                format,
                quiet,
                show_stats: cli.verbose,
                file_config,
            })
        }
        Commands::ListHooks { technology } => {
            commands::list_hooks::run(technology.as_deref());
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
