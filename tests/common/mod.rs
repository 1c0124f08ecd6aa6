//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lexidex::core::config::Config;
use tempfile::TempDir;

/// Config with every persisted path rooted inside the temp dir and a
/// fast retry policy suitable for tests
pub fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.store.db_path = tmp.path().join("chunks.db");
    config.artifacts.tokens_dir = tmp.path().join("tokens");
    config.artifacts.global_freq_path = tmp.path().join("global_word_freq.json");
    config.artifacts.buffer_path = tmp.path().join("buffer.json");
    config.artifacts.log_path = tmp.path().join("lexidex.log");
    config.retry.max_attempts = 50;
    config.retry.delay_ms = 2;
    config
}

/// Write a set of (relative path, content) files under `root`
pub fn write_corpus(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
