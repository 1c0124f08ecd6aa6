//! Lexidex - concurrent document chunking and word-frequency indexing
//!
//! Ingests a directory tree of documents, splits each into bounded
//! text chunks, persists the chunks into a SQLite store under write
//! contention, and derives per-document and corpus-wide stemmed
//! word-frequency artifacts from that store.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (interface-agnostic)
//!   - config, error, types, paths
//!   - batcher, extract, splitter (discovery and chunking)
//!   - store (SQLite chunk store, contention-tolerant writer)
//!   - normalize (stopword filtering, stemmed frequencies)
//!   - ingest, freq (the two pipeline coordinators)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Key Properties
//!
//! - Batch-sequential, file-concurrent ingestion with per-file
//!   error isolation
//! - Bounded retry with fixed delay on store lock contention
//! - Incremental re-runs skip already-ingested documents
//! - UTF-8 safe chunk boundaries, lossless chunk concatenation
//! - Deterministic JSON frequency artifacts

// Core domain logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{LexidexError, Result};
pub use core::types::*;
