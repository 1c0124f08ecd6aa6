//! Text extraction collaborator seam.
//!
//! Extraction is an external concern: the pipeline only needs "full
//! concatenated text for a path, or empty string on failure". The trait
//! keeps richer extractors (a PDF text layer, for instance) pluggable
//! without touching the coordinators.

use std::fs;
use std::path::Path;

/// Extracts the full text of a document.
///
/// Implementations must never panic; on failure they log and return an
/// empty string, which callers treat as a skip, not an error.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> String;
}

/// Reads files as text, replacing invalid UTF-8 sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> String {
        match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::error!("Failed to read {:?}: {}", path, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.txt");
        fs::write(&path, "some document text").unwrap();

        assert_eq!(PlainTextExtractor.extract(&path), "some document text");
    }

    #[test]
    fn test_missing_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");

        assert_eq!(PlainTextExtractor.extract(&path), "");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.txt");
        fs::write(&path, [b'o', b'k', 0xff, 0xfe, b'!']).unwrap();

        let text = PlainTextExtractor.extract(&path);
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }
}
