//! Index command - derive word-frequency artifacts from the store

use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::cli::output::{colors, format_duration, print_output};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::freq;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Concurrent document workers
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,
}

/// Frequency-indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub documents_indexed: usize,
    pub documents_failed: usize,
    pub unique_stems: usize,
    pub tokens_dir: String,
    pub global_artifact: String,
    pub duration_secs: f64,
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    config: &Arc<Config>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = (**config).clone();
    if let Some(workers) = args.workers {
        config.frequency.workers = workers;
    }
    config.validate()?;

    let stats = freq::run(&config).await?;

    let response = IndexResponse {
        documents_indexed: stats.documents_indexed,
        documents_failed: stats.documents_failed,
        unique_stems: stats.unique_stems,
        tokens_dir: config.artifacts.tokens_dir.display().to_string(),
        global_artifact: config.artifacts.global_freq_path.display().to_string(),
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    if print_output(&response, format) {
        return Ok(());
    }

    println!("{}", colors::success("Frequency indexing complete"));
    println!(
        "  {} {}",
        colors::label("Documents indexed:"),
        colors::number(&response.documents_indexed.to_string())
    );
    if response.documents_failed > 0 {
        println!(
            "  {} {}",
            colors::label("Documents failed:"),
            colors::warning(&response.documents_failed.to_string())
        );
    }
    println!(
        "  {} {}",
        colors::label("Unique stems:"),
        colors::number(&response.unique_stems.to_string())
    );
    println!(
        "  {} {}",
        colors::label("Artifacts:"),
        colors::file_path(&response.tokens_dir)
    );
    println!(
        "  {} {}",
        colors::label("Global:"),
        colors::file_path(&response.global_artifact)
    );
    println!(
        "  {} {}",
        colors::label("Duration:"),
        format_duration(response.duration_secs)
    );

    Ok(())
}
