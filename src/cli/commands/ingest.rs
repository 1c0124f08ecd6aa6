//! Ingest command - populate the chunk store from a directory tree

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::output::{colors, format_duration, print_output};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::LexidexError;
use crate::core::extract::PlainTextExtractor;
use crate::core::ingest;
use crate::core::types::IngestMode;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Root directory to ingest
    pub path: PathBuf,

    /// Skip files already present in the store instead of resetting it
    #[arg(long)]
    pub incremental: bool,

    /// Characters per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// File extension to ingest (without the dot)
    #[arg(long, short = 'e')]
    pub extension: Option<String>,

    /// Files per discovery batch
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Ingestion result response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub path: String,
    pub mode: String,
    pub files_ingested: usize,
    pub files_skipped: usize,
    pub chunks_stored: usize,
    pub duration_secs: f64,
}

/// Execute the ingest command
pub async fn execute(
    args: IngestArgs,
    config: &Arc<Config>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.path.canonicalize().map_err(|e| {
        LexidexError::InvalidPath(format!(
            "'{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        ))
    })?;

    if !path.is_dir() {
        return Err(LexidexError::InvalidPath(format!(
            "'{}' is not a directory. Lexidex ingests directory trees, not individual files.",
            path.display()
        ))
        .into());
    }

    let mut config = (**config).clone();
    if let Some(chunk_size) = args.chunk_size {
        config.ingest.chunk_size = chunk_size;
    }
    if let Some(extension) = args.extension {
        config.ingest.extension = extension;
    }
    if let Some(batch_size) = args.batch_size {
        config.ingest.batch_size = batch_size;
    }
    config.validate()?;

    let mode = if args.incremental {
        IngestMode::Incremental
    } else {
        IngestMode::Reset
    };

    let stats = ingest::run(&config, Arc::new(PlainTextExtractor), &path, mode).await?;

    let response = IngestResponse {
        path: path.display().to_string(),
        mode: format!("{mode:?}").to_lowercase(),
        files_ingested: stats.files_ingested,
        files_skipped: stats.files_skipped,
        chunks_stored: stats.chunks_stored,
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    if print_output(&response, format) {
        return Ok(());
    }

    println!("{}", colors::success("Ingestion complete"));
    println!(
        "  {} {}",
        colors::label("Path:"),
        colors::file_path(&response.path)
    );
    println!("  {} {}", colors::label("Mode:"), response.mode);
    println!(
        "  {} {}",
        colors::label("Files ingested:"),
        colors::number(&response.files_ingested.to_string())
    );
    println!(
        "  {} {}",
        colors::label("Files skipped:"),
        colors::number(&response.files_skipped.to_string())
    );
    println!(
        "  {} {}",
        colors::label("Chunks stored:"),
        colors::number(&response.chunks_stored.to_string())
    );
    println!(
        "  {} {}",
        colors::label("Duration:"),
        format_duration(response.duration_secs)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(path: PathBuf) -> IngestArgs {
        IngestArgs {
            path,
            incremental: false,
            chunk_size: None,
            extension: None,
            batch_size: None,
        }
    }

    #[tokio::test]
    async fn test_missing_path_rejected() {
        let config = Arc::new(Config::default());
        let args = args_for(PathBuf::from("/no/such/lexidex-dir"));

        let err = execute(args, &config, OutputFormat::Human)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid path"));
    }

    #[tokio::test]
    async fn test_file_path_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("doc.txt");
        fs::write(&file, "content").unwrap();
        let config = Arc::new(Config::default());

        let err = execute(args_for(file), &config, OutputFormat::Human)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
