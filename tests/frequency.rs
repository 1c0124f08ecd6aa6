//! Frequency indexing tests against an ingested store

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lexidex::core::extract::PlainTextExtractor;
use lexidex::core::types::{FreqMap, IngestMode};
use lexidex::core::{freq, ingest, store};
use tempfile::TempDir;

use common::{test_config, write_corpus};

fn read_freq(path: &Path) -> FreqMap {
    let raw = fs::read_to_string(path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn per_document_artifacts_and_global_sum() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    let corpus = tmp.path().join("corpus");
    // First token and last two tokens are boundary-dropped, so only
    // the middle words count.
    write_corpus(
        &corpus,
        &[
            ("one.txt", "start test test test end tail"),
            ("two.txt", "pad comet pad pad"),
        ],
    );

    ingest::run(
        &config,
        Arc::new(PlainTextExtractor),
        &corpus,
        IngestMode::Reset,
    )
    .await
    .unwrap();

    let stats = freq::run(&config).await.unwrap();
    assert_eq!(stats.documents_indexed, 2);
    assert_eq!(stats.documents_failed, 0);
    assert_eq!(stats.unique_stems, 2);

    let conn = store::open(&config.store.db_path).unwrap();
    let docs = store::documents_with_chunks(&conn).unwrap();
    assert_eq!(docs.len(), 2);

    for doc in &docs {
        let artifact = config
            .artifacts
            .tokens_dir
            .join(format!("doc_{}.json", doc.id));
        let freq = read_freq(&artifact);
        match doc.file_name.as_str() {
            "one.txt" => {
                assert_eq!(freq.len(), 1);
                assert_eq!(freq.get("test"), Some(&3));
            }
            "two.txt" => {
                assert_eq!(freq.len(), 1);
                assert_eq!(freq.get("comet"), Some(&1));
            }
            other => panic!("unexpected document {other}"),
        }
    }

    let global = read_freq(&config.artifacts.global_freq_path);
    assert_eq!(global.get("test"), Some(&3));
    assert_eq!(global.get("comet"), Some(&1));
    assert_eq!(global.values().sum::<u64>(), 4);
}

#[tokio::test]
async fn rerun_discards_stale_artifacts() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    let corpus = tmp.path().join("corpus");
    write_corpus(&corpus, &[("one.txt", "start test test test end tail")]);

    ingest::run(
        &config,
        Arc::new(PlainTextExtractor),
        &corpus,
        IngestMode::Reset,
    )
    .await
    .unwrap();
    freq::run(&config).await.unwrap();

    // A leftover from a previous document set must not survive.
    let stale = config.artifacts.tokens_dir.join("doc_999.json");
    fs::write(&stale, "{}").unwrap();

    freq::run(&config).await.unwrap();
    assert!(!stale.exists());

    let entries = fs::read_dir(&config.artifacts.tokens_dir).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn empty_store_yields_empty_global_map() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    {
        let conn = store::open(&config.store.db_path).unwrap();
        store::init_schema(&conn).unwrap();
    }

    let stats = freq::run(&config).await.unwrap();
    assert_eq!(stats.documents_indexed, 0);
    assert_eq!(stats.unique_stems, 0);

    let global = read_freq(&config.artifacts.global_freq_path);
    assert!(global.is_empty());
}
