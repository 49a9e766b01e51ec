//! design-lint CLI tool.
//!
//! Usage:
//! ```bash
//! design-lint check [OPTIONS] [PATH]
//! design-lint codemod [--dry] [--only <name>]
//! design-lint guard [--dir <DIR>]...
//! design-lint list-rules
//! design-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Design-token compliance linter and migration codemods for TSX projects
#[derive(Parser)]
#[command(name = "design-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the JSON configuration file
    #[arg(short, long, global = true, env = "DESIGN_LINT_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the JSON allowlist file
    #[arg(short, long, global = true, env = "DESIGN_LINT_ALLOWLIST")]
    allowlist: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Rule preset used when --rules is not given
        #[arg(long, default_value = "recommended")]
        preset: PresetArg,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Run the migration codemods in the current directory
    Codemod {
        /// Report what would change without writing
        #[arg(long)]
        dry: bool,

        /// Extra include globs (extend the defaults)
        #[arg(long)]
        include: Vec<String>,

        /// Extra exclude globs (extend the defaults)
        #[arg(long)]
        exclude: Vec<String>,

        /// Run a single codemod by name
        #[arg(long)]
        only: Option<String>,
    },

    /// Sweep marketing-facing components for raw hex and bracketed values
    Guard {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Directories to sweep instead of the defaults (repeatable)
        #[arg(long = "dir")]
        dirs: Vec<String>,
    },

    /// List available rules and codemods
    ListRules,

    /// Write starter configuration and allowlist files
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Text output with annotated source snippets.
    Pretty,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Rule preset selection.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PresetArg {
    /// Both rules at their default severities.
    #[default]
    Recommended,
    /// Raw colors reported as warnings.
    Migration,
}

impl From<PresetArg> for design_lint_rules::Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Recommended => Self::Recommended,
            PresetArg::Migration => Self::Migration,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir()?;
    let settings = config_resolver::resolve(&cwd, cli.config.as_deref(), cli.allowlist.as_deref());

    match cli.command {
        Commands::Check {
            path,
            format,
            preset,
            rules,
            exclude,
        } => commands::check::run(&path, format, preset.into(), rules, exclude, &settings),
        Commands::Codemod {
            dry,
            include,
            exclude,
            only,
        } => {
            let options = design_lint_codemods::CodemodOptions {
                dry,
                verbose: cli.verbose,
                include,
                exclude,
                only,
            };
            commands::codemod::run(&cwd, options)
        }
        Commands::Guard { path, dirs } => commands::guard::run(&path, dirs),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(&cwd, force),
    }
}
