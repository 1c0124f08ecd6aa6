//! Ingestion pipeline orchestration.
//!
//! Turns a stream of file batches into populated chunk-store rows:
//! walk the tree in batches, extract each file's text, split it into
//! chunks, and store them through the contention-tolerant writer.
//! Batches are processed sequentially relative to each other; files
//! within a batch run fully concurrent on a bounded worker pool. A
//! failure in any single file's pipeline is logged and does not abort
//! the batch or other in-flight files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::batcher::FileBatches;
use crate::core::config::Config;
use crate::core::error::{LexidexError, Result};
use crate::core::extract::TextExtractor;
use crate::core::splitter::split_text;
use crate::core::store::{self, RetryPolicy};
use crate::core::types::{IngestMode, IngestStats};

/// Document key for a file: its path relative to the ingest root.
///
/// Keying by relative path (rather than base name) keeps same-named
/// files in different subdirectories from aliasing onto one document
/// record.
pub fn document_key(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .into_owned()
}

/// Ingest all matching files under `root` into the chunk store.
///
/// `Reset` mode drops and recreates the tables first; `Incremental`
/// mode skips files whose document key is already present. Document
/// metadata is re-materialized once all batches complete.
pub async fn run(
    config: &Config,
    extractor: Arc<dyn TextExtractor>,
    root: &Path,
    mode: IngestMode,
) -> Result<IngestStats> {
    let start = Instant::now();
    let policy = RetryPolicy::from(&config.retry);

    {
        let conn = store::open(&config.store.db_path)?;
        match mode {
            IngestMode::Reset => store::reset_schema(&conn)?,
            IngestMode::Incremental => store::init_schema(&conn)?,
        }
    }

    let workers = thread::available_parallelism().map(usize::from).unwrap_or(4);
    tracing::info!(
        "Starting ingestion from {:?} (mode: {:?}, {} workers per batch)",
        root,
        mode,
        workers
    );

    let mut stats = IngestStats::default();

    let batches = FileBatches::new(
        root,
        &config.ingest.extension,
        config.ingest.batch_size,
        config.ingest.max_file_size_mb,
    );

    for mut batch in batches {
        if mode == IngestMode::Incremental {
            let conn = store::open(&config.store.db_path)?;
            let known = store::ingested_files(&conn)?;
            batch.retain(|file| !known.contains(&document_key(file, root)));
        }

        if batch.is_empty() {
            continue;
        }

        tracing::info!("Processing batch of {} files", batch.len());
        process_batch(config, &extractor, root, &policy, batch, workers, &mut stats).await;
    }

    let documents = {
        let conn = store::open(&config.store.db_path)?;
        store::materialize_documents(&conn)?
    };

    stats.duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Ingestion complete: {} files ingested, {} skipped, {} chunks stored, \
         {} document records, in {}ms",
        stats.files_ingested,
        stats.files_skipped,
        stats.chunks_stored,
        documents,
        stats.duration_ms
    );

    Ok(stats)
}

/// Fan one batch out across the worker pool and drain completions
/// in arbitrary finish order.
async fn process_batch(
    config: &Config,
    extractor: &Arc<dyn TextExtractor>,
    root: &Path,
    policy: &RetryPolicy,
    batch: Vec<PathBuf>,
    workers: usize,
    stats: &mut IngestStats,
) {
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut pool: JoinSet<(PathBuf, Result<Option<usize>>)> = JoinSet::new();

    for file in batch {
        let semaphore = Arc::clone(&semaphore);
        let extractor = Arc::clone(extractor);
        let root = root.to_path_buf();
        let db_path = config.store.db_path.clone();
        let policy = policy.clone();
        let chunk_size = config.ingest.chunk_size;

        pool.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        file,
                        Err(LexidexError::IngestFailed("worker pool closed".to_string())),
                    )
                }
            };

            let task_file = file.clone();
            let joined = tokio::task::spawn_blocking(move || {
                process_file(&task_file, &root, chunk_size, &db_path, &policy, &*extractor)
            })
            .await;

            match joined {
                Ok(result) => (file, result),
                Err(e) => (
                    file,
                    Err(LexidexError::IngestFailed(format!("worker panicked: {e}"))),
                ),
            }
        });
    }

    while let Some(joined) = pool.join_next().await {
        match joined {
            Ok((file, Ok(Some(chunks)))) => {
                stats.files_ingested += 1;
                stats.chunks_stored += chunks;
                tracing::info!("Processed {:?} ({} chunks)", file, chunks);
            }
            Ok((_, Ok(None))) => {
                stats.files_skipped += 1;
            }
            Ok((file, Err(e))) => {
                stats.files_skipped += 1;
                tracing::error!("Error processing {:?}: {}", file, e);
            }
            Err(e) => {
                stats.files_skipped += 1;
                tracing::error!("Ingest worker failed: {}", e);
            }
        }
    }
}

/// Extract, split, and store one file.
///
/// Empty-result conditions (no text, no chunks) are warnings, not
/// errors: the file is skipped and `None` returned.
fn process_file(
    file: &Path,
    root: &Path,
    chunk_size: usize,
    db_path: &Path,
    policy: &RetryPolicy,
    extractor: &dyn TextExtractor,
) -> Result<Option<usize>> {
    let text = extractor.extract(file);
    if text.is_empty() {
        tracing::warn!("No text extracted from {:?}", file);
        return Ok(None);
    }

    let chunks = split_text(&text, chunk_size);
    if chunks.is_empty() {
        tracing::warn!("No chunks created for {:?}", file);
        return Ok(None);
    }

    let key = document_key(file, root);
    let stored = store::store_chunks(db_path, policy, &key, &chunks)?;
    Ok(Some(stored))
}
