//! Core domain logic (protocol-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **paths**: XDG-style directory handling
//! - **batcher**: Lazy batched file discovery
//! - **extract**: Text extraction collaborator seam
//! - **splitter**: Recursive separator-based chunking
//! - **normalize**: Stopword filtering and stemmed frequencies
//! - **store**: SQLite chunk store and retry writer
//! - **ingest**: Ingestion coordinator
//! - **freq**: Frequency-indexing coordinator

pub mod batcher;
pub mod config;
pub mod error;
pub mod extract;
pub mod freq;
pub mod ingest;
pub mod normalize;
pub mod paths;
pub mod splitter;
pub mod store;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{LexidexError, Result};
