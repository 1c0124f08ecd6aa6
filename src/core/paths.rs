//! XDG-style directory resolution for lexidex data.
//!
//! All persisted state (chunk store, frequency artifacts, log file)
//! defaults to locations under an XDG data directory, overridable via
//! environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::Result;

/// Resolved data directories for lexidex
#[derive(Debug, Clone)]
pub struct DataDirs {
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl DataDirs {
    /// Resolve directories with proper priority order
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit LEXIDEX_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.local/share, ~/.local/state)
    pub fn new() -> Self {
        Self {
            data_dir: Self::resolve_data_dir(),
            state_dir: Self::resolve_state_dir(),
        }
    }

    fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = env::var("LEXIDEX_DATA_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("lexidex");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join("lexidex")
    }

    fn resolve_state_dir() -> PathBuf {
        if let Ok(dir) = env::var("LEXIDEX_STATE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_STATE_HOME") {
            return PathBuf::from(xdg).join("lexidex");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("state")
            .join("lexidex")
    }

    /// Chunk-store database file
    pub fn db_file(&self) -> PathBuf {
        self.data_dir.join("chunks.db")
    }

    /// Directory holding one frequency artifact per document
    pub fn tokens_dir(&self) -> PathBuf {
        self.data_dir.join("tokens")
    }

    /// Corpus-wide frequency artifact
    pub fn global_freq_file(&self) -> PathBuf {
        self.data_dir.join("global_word_freq.json")
    }

    /// Buffer artifact written by the interactive prompt
    pub fn buffer_file(&self) -> PathBuf {
        self.data_dir.join("buffer.json")
    }

    /// Run log with timestamped info/warning/error events
    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join("lexidex.log")
    }

    /// Create all required directories
    pub fn ensure_dirs_exist(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }
}

impl Default for DataDirs {
    fn default() -> Self {
        Self::new()
    }
}
