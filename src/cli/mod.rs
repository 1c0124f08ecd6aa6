//! CLI adapter for lexidex
//!
//! Thin clap layer over the core coordinators: `ingest` populates the
//! chunk store, `index` derives frequency artifacts, `prompt` prepares
//! a query buffer, `show-config` prints the effective configuration.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::paths::DataDirs;

/// Lexidex - document chunking and word-frequency indexing
///
/// Ingests a directory tree of documents into a SQLite chunk store and
/// derives per-document and corpus-wide stemmed word-frequency maps.
#[derive(Parser, Debug)]
#[command(name = "lexidex")]
#[command(version)]
#[command(about = "Document chunking and word-frequency indexing", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a directory tree into the chunk store
    Ingest(commands::IngestArgs),

    /// Derive word-frequency artifacts from the chunk store
    Index(commands::IndexArgs),

    /// Normalize a free-text prompt into the query buffer artifact
    Prompt(commands::PromptArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),
}

/// Parse config, set up directories and logging, and dispatch the command
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dirs = DataDirs::new();
    dirs.ensure_dirs_exist()?;

    let config = Arc::new(Config::load(cli.config.as_deref())?);

    init_tracing(&config)?;
    tracing::info!("Starting lexidex v{}", env!("CARGO_PKG_VERSION"));
    config.log_config();

    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &config, cli.format).await,
        Commands::Index(args) => commands::index::execute(args, &config, cli.format).await,
        Commands::Prompt(args) => commands::prompt::execute(args, &config, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
    }
}

/// Install the tracing registry: stdout plus an append-mode log file
/// with timestamps and no ANSI escapes.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    if let Some(parent) = config.artifacts.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.artifacts.log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexidex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::try_parse_from(["lexidex", "ingest", "/tmp/docs", "--incremental"]).unwrap();
        match cli.command {
            Commands::Ingest(args) => {
                assert_eq!(args.path, PathBuf::from("/tmp/docs"));
                assert!(args.incremental);
            }
            other => panic!("expected ingest, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["lexidex", "--format", "json", "index"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
