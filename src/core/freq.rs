//! Word-frequency indexing over the chunk store.
//!
//! Derives one frequency artifact per document plus a corpus-wide
//! aggregate. Documents are distributed across a small fixed worker
//! pool; each worker owns its store connection, streams its document's
//! chunks through the normalizer, and its artifact is written the
//! moment it completes. The global map is owned by the coordinator
//! alone and written once after the join barrier.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::config::Config;
use crate::core::error::{LexidexError, Result};
use crate::core::normalize::{self, STOP_SET};
use crate::core::store;
use crate::core::types::{DocumentRecord, FreqMap, FreqStats};

/// Write a frequency map as a pretty-printed JSON artifact
pub fn write_freq_artifact(path: &Path, freq: &FreqMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), freq)?;
    Ok(())
}

/// Artifact file name for a document record
fn artifact_name(doc_id: i64) -> String {
    format!("doc_{doc_id}.json")
}

/// Derive per-document and global frequency artifacts.
///
/// The per-document artifact directory is deleted and recreated before
/// any work starts, so no stale artifacts survive a re-run with a
/// changed document set.
pub async fn run(config: &Config) -> Result<FreqStats> {
    let start = Instant::now();

    let tokens_dir = &config.artifacts.tokens_dir;
    if tokens_dir.exists() {
        fs::remove_dir_all(tokens_dir)?;
    }
    fs::create_dir_all(tokens_dir)?;

    let documents = {
        let conn = store::open(&config.store.db_path)?;
        store::init_schema(&conn)?;
        store::documents_with_chunks(&conn)?
    };
    tracing::info!(
        "Indexing word frequencies for {} documents ({} workers)",
        documents.len(),
        config.frequency.workers
    );

    let semaphore = Arc::new(Semaphore::new(config.frequency.workers.max(1)));
    let mut pool: JoinSet<(DocumentRecord, Result<FreqMap>)> = JoinSet::new();

    for doc in documents {
        let semaphore = Arc::clone(&semaphore);
        let db_path = config.store.db_path.clone();

        pool.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        doc,
                        Err(LexidexError::IndexingFailed(
                            "worker pool closed".to_string(),
                        )),
                    )
                }
            };

            let task_doc = doc.clone();
            let joined =
                tokio::task::spawn_blocking(move || index_document(&db_path, &task_doc)).await;

            match joined {
                Ok(result) => (doc, result),
                Err(e) => (
                    doc,
                    Err(LexidexError::IndexingFailed(format!("worker panicked: {e}"))),
                ),
            }
        });
    }

    let mut stats = FreqStats::default();
    let mut global = FreqMap::new();

    while let Some(joined) = pool.join_next().await {
        match joined {
            Ok((doc, Ok(freq))) => {
                // Write each document's artifact immediately on
                // completion; only the global sum waits for the barrier
                let artifact = tokens_dir.join(artifact_name(doc.id));
                if let Err(e) = write_freq_artifact(&artifact, &freq) {
                    stats.documents_failed += 1;
                    tracing::error!("Failed to write artifact for {}: {}", doc.file_name, e);
                    continue;
                }

                for (stem, count) in freq {
                    *global.entry(stem).or_insert(0) += count;
                }
                stats.documents_indexed += 1;
                tracing::info!("Indexed {} -> {:?}", doc.file_name, artifact);
            }
            Ok((doc, Err(e))) => {
                stats.documents_failed += 1;
                tracing::error!("Error indexing {}: {}", doc.file_name, e);
            }
            Err(e) => {
                stats.documents_failed += 1;
                tracing::error!("Frequency worker failed: {}", e);
            }
        }
    }

    write_freq_artifact(&config.artifacts.global_freq_path, &global)?;

    stats.unique_stems = global.len();
    stats.duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Frequency indexing complete: {} documents indexed, {} failed, \
         {} unique stems, in {}ms",
        stats.documents_indexed,
        stats.documents_failed,
        stats.unique_stems,
        stats.duration_ms
    );

    Ok(stats)
}

/// Accumulate one document's stem counts.
///
/// Opens a dedicated connection and streams chunk texts one at a time
/// through the normalizer; the document's chunks are never all in
/// memory at once.
fn index_document(db_path: &Path, doc: &DocumentRecord) -> Result<FreqMap> {
    let conn = store::open(db_path)?;
    let mut freq = FreqMap::new();

    store::for_each_chunk_text(&conn, doc, |text| {
        for (stem, count) in normalize::token_frequencies(text, &STOP_SET) {
            *freq.entry(stem).or_insert(0) += count;
        }
    })?;

    Ok(freq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::RetryPolicy;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.store.db_path = dir.path().join("chunks.db");
        config.artifacts.tokens_dir = dir.path().join("tokens");
        config.artifacts.global_freq_path = dir.path().join("global_word_freq.json");
        config.frequency.workers = 2;
        config
    }

    fn seed_document(config: &Config, file_name: &str, chunks: &[&str]) {
        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let owned: Vec<String> = chunks.iter().map(|c| c.to_string()).collect();
        {
            let conn = store::open(&config.store.db_path).unwrap();
            store::init_schema(&conn).unwrap();
        }
        store::store_chunks(&config.store.db_path, &policy, file_name, &owned).unwrap();
        let conn = store::open(&config.store.db_path).unwrap();
        store::materialize_documents(&conn).unwrap();
    }

    fn read_freq(path: &Path) -> FreqMap {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_per_document_artifact_counts() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        // Interior tokens: "test" three times plus "word"
        seed_document(&config, "a.txt", &["pad test test test word tail end"]);

        let stats = run(&config).await.unwrap();
        assert_eq!(stats.documents_indexed, 1);
        assert_eq!(stats.documents_failed, 0);

        let conn = store::open(&config.store.db_path).unwrap();
        let docs = store::documents_with_chunks(&conn).unwrap();
        let artifact = config
            .artifacts
            .tokens_dir
            .join(artifact_name(docs[0].id));
        let freq = read_freq(&artifact);
        assert_eq!(freq.get("test"), Some(&3));
    }

    #[tokio::test]
    async fn test_global_artifact_sums_documents() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        seed_document(&config, "a.txt", &["pad test test test word tail end"]);

        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        store::store_chunks(
            &config.store.db_path,
            &policy,
            "b.txt",
            &["pad test other word extra tail end".to_string()],
        )
        .unwrap();
        {
            let conn = store::open(&config.store.db_path).unwrap();
            store::materialize_documents(&conn).unwrap();
        }

        let stats = run(&config).await.unwrap();
        assert_eq!(stats.documents_indexed, 2);

        let global = read_freq(&config.artifacts.global_freq_path);
        // 3 from a.txt plus 1 from b.txt
        assert_eq!(global.get("test"), Some(&4));
        assert_eq!(stats.unique_stems, global.len());
    }

    #[tokio::test]
    async fn test_stale_artifacts_removed() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        seed_document(&config, "a.txt", &["pad test test test word tail end"]);

        fs::create_dir_all(&config.artifacts.tokens_dir).unwrap();
        let stale = config.artifacts.tokens_dir.join("doc_999.json");
        fs::write(&stale, "{}").unwrap();

        run(&config).await.unwrap();
        assert!(!stale.exists());
    }

    #[tokio::test]
    async fn test_empty_store_writes_empty_global() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);

        let stats = run(&config).await.unwrap();
        assert_eq!(stats.documents_indexed, 0);
        assert!(read_freq(&config.artifacts.global_freq_path).is_empty());
    }
}
