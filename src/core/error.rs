//! Error types and error handling for the lexidex pipeline.
//!
//! Failures are recovered at the smallest unit boundary that keeps the
//! pipeline moving: per file during ingestion, per document during
//! frequency indexing. Only retry exhaustion and configuration errors
//! are allowed to terminate a run.

use thiserror::Error;

/// Result type alias for lexidex operations
pub type Result<T> = std::result::Result<T, LexidexError>;

/// Main error type for the lexidex pipeline
#[derive(Error, Debug)]
pub enum LexidexError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Ingestion failed: {0}")]
    IngestFailed(String),

    #[error("Frequency indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Store write retry exhausted after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: usize,
        #[source]
        source: Box<LexidexError>,
    },

    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LexidexError {
    /// Check if this error is SQLite lock contention (another writer
    /// currently holds the store). Only this class is retried.
    pub fn is_contention(&self) -> bool {
        use rusqlite::ErrorCode;

        match self {
            LexidexError::StoreError(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_error_is_contention() {
        let err = LexidexError::StoreError(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        ));
        assert!(err.is_contention());
    }

    #[test]
    fn test_locked_error_is_contention() {
        let err = LexidexError::StoreError(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            None,
        ));
        assert!(err.is_contention());
    }

    #[test]
    fn test_other_store_error_is_not_contention() {
        let err = LexidexError::StoreError(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CORRUPT),
            None,
        ));
        assert!(!err.is_contention());
    }

    #[test]
    fn test_io_error_is_not_contention() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = LexidexError::from(io_err);
        assert!(!err.is_contention());
    }

    #[test]
    fn test_invalid_path_is_not_contention() {
        let err = LexidexError::InvalidPath("/no/such/dir".to_string());
        assert!(!err.is_contention());
    }

    #[test]
    fn test_retry_exhausted_display() {
        let inner = LexidexError::StoreError(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        let err = LexidexError::RetryExhausted {
            attempts: 3,
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("3 attempts"));
    }
}
