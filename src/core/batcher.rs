//! Lazy batched file discovery.
//!
//! Walks a directory tree and yields fixed-size batches of matching
//! file paths. Walking is interleaved with yielding, so processing of
//! early batches can begin before the whole tree is enumerated and peak
//! memory stays bounded on very large trees. Walk errors (permission
//! denied, etc.) are logged and skipped without stopping the walk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Iterator over batches of matching file paths.
///
/// Not restartable mid-walk; construct a fresh instance to re-walk
/// from scratch.
pub struct FileBatches {
    walker: walkdir::IntoIter,
    extension: String,
    batch_size: usize,
    max_file_size_bytes: u64,
}

impl FileBatches {
    /// Start a walk under `root` for files with the given extension
    /// (matched case-insensitively, without the dot), yielding batches
    /// of at most `batch_size` paths.
    pub fn new(root: &Path, extension: &str, batch_size: usize, max_file_size_mb: usize) -> Self {
        Self {
            walker: WalkDir::new(root).follow_links(false).into_iter(),
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
            batch_size: batch_size.max(1),
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

impl Iterator for FileBatches {
    type Item = Vec<PathBuf>;

    fn next(&mut self) -> Option<Vec<PathBuf>> {
        let mut batch = Vec::with_capacity(self.batch_size);

        loop {
            let entry = match self.walker.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
                None => break,
            };

            // Skip hidden directory trees entirely
            if entry.file_type().is_dir() && entry.depth() > 0 {
                if let Some(name) = entry.path().file_name().and_then(|n| n.to_str()) {
                    if name.starts_with('.') {
                        self.walker.skip_current_dir();
                    }
                }
                continue;
            }

            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::debug!(
                        "Skipping large file: {:?} ({} bytes)",
                        entry.path(),
                        metadata.len()
                    );
                    continue;
                }
            }

            batch.push(entry.path().to_path_buf());
            if batch.len() == self.batch_size {
                return Some(batch);
            }
        }

        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_files(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            let path = temp_dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "test content").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_extension_filter() {
        let temp_dir = create_test_files(&["a.txt", "b.md", "c.txt"]);

        let files: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "txt"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let temp_dir = create_test_files(&["a.TXT", "b.Txt"]);

        let files: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_batch_size_cap() {
        let names: Vec<String> = (0..25).map(|i| format!("f{i}.txt")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let temp_dir = create_test_files(&refs);

        let batches: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 10, 10).collect();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 10);
        assert_eq!(batches[1].len(), 10);
        // Final batch may be smaller than the cap
        assert_eq!(batches[2].len(), 5);
    }

    #[test]
    fn test_nested_directories() {
        let temp_dir = create_test_files(&["top.txt", "sub/inner.txt", "sub/deep/leaf.txt"]);

        let files: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();

        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_hidden_directories_skipped() {
        let temp_dir = create_test_files(&["visible.txt", ".cache/hidden.txt"]);

        let files: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.txt"));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let batches: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10).collect();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_large_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("small.txt"), "tiny").unwrap();
        fs::write(temp_dir.path().join("big.txt"), vec![b'x'; 2 * 1024 * 1024]).unwrap();

        // 1 MB cap
        let files: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 1)
            .flatten()
            .collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.txt"));
    }

    #[test]
    fn test_fresh_iterator_rewalks() {
        let temp_dir = create_test_files(&["a.txt", "b.txt"]);

        let first: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();
        let second: Vec<_> = FileBatches::new(temp_dir.path(), "txt", 100, 10)
            .flatten()
            .collect();

        assert_eq!(first.len(), second.len());
    }
}
