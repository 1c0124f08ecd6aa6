//! Core data types for the lexidex pipeline.
//!
//! Defines the rows of the chunk store and the statistics structs
//! reported by the ingestion and frequency-indexing coordinators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-stem occurrence counts.
///
/// A `BTreeMap` keeps artifact output deterministic across runs.
pub type FreqMap = BTreeMap<String, u64>;

/// One stored text chunk.
///
/// Chunk rows for a given document are written in a single transaction,
/// so their ids are contiguous in insertion order. The frequency indexer
/// relies on that contiguity instead of filtering by `file_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRow {
    /// Store-assigned id, monotonically increasing
    pub id: i64,

    /// Document key (path relative to the ingest root)
    pub file_name: String,

    /// 0-based position within the source document
    pub chunk_index: usize,

    /// Raw chunk text, no normalization applied at storage time
    pub chunk_text: String,
}

/// Metadata row locating a document's chunk range in the chunk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Store-assigned document id (names the per-document artifact)
    pub id: i64,

    /// Document key (path relative to the ingest root)
    pub file_name: String,

    /// Number of chunks stored for this document
    pub chunk_count: usize,

    /// Id of the document's first chunk in insertion order
    pub starting_id: i64,
}

/// How the ingestion coordinator treats prior store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Drop and recreate the chunk tables before processing
    Reset,

    /// Skip files whose document key is already in the store
    Incremental,
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Files whose chunks were stored
    pub files_ingested: usize,

    /// Files skipped (already ingested, empty, or failed)
    pub files_skipped: usize,

    /// Total chunk rows written
    pub chunks_stored: usize,

    /// Ingestion duration in milliseconds
    pub duration_ms: u64,
}

/// Statistics from a frequency-indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreqStats {
    /// Documents whose artifact was written
    pub documents_indexed: usize,

    /// Documents that failed and were omitted from the global sum
    pub documents_failed: usize,

    /// Distinct stems in the global frequency map
    pub unique_stems: usize,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,
}
