//! CLI command implementations

pub mod config;
pub mod index;
pub mod ingest;
pub mod prompt;

pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use ingest::IngestArgs;
pub use prompt::PromptArgs;
