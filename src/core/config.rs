//! Configuration management for the lexidex pipeline.
//!
//! Handles loading configuration from TOML files and environment
//! variables, with sensible defaults for all settings.

use crate::core::error::{LexidexError, Result};
use crate::core::paths::DataDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub frequency: FrequencyConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// File extension to ingest (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Files per discovery batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Chunk-store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

/// Output artifact locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// Directory for per-document frequency artifacts
    #[serde(default = "default_tokens_dir")]
    pub tokens_dir: PathBuf,

    /// Corpus-wide frequency artifact
    #[serde(default = "default_global_freq_path")]
    pub global_freq_path: PathBuf,

    /// Buffer artifact written by the prompt front end
    #[serde(default = "default_buffer_path")]
    pub buffer_path: PathBuf,

    /// Run log file
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

/// Store-write retry policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Maximum write attempts under lock contention
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

/// Frequency-indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrequencyConfig {
    /// Concurrent document workers (each holds its own store connection)
    #[serde(default = "default_freq_workers")]
    pub workers: usize,
}

// Default value functions
fn default_extension() -> String {
    "txt".to_string()
}

fn default_chunk_size() -> usize {
    5000
}

fn default_batch_size() -> usize {
    100
}

fn default_max_file_size() -> usize {
    10
}

fn default_db_path() -> PathBuf {
    DataDirs::new().db_file()
}

fn default_tokens_dir() -> PathBuf {
    DataDirs::new().tokens_dir()
}

fn default_global_freq_path() -> PathBuf {
    DataDirs::new().global_freq_file()
}

fn default_buffer_path() -> PathBuf {
    DataDirs::new().buffer_file()
}

fn default_log_path() -> PathBuf {
    DataDirs::new().log_file()
}

fn default_max_attempts() -> usize {
    999
}

fn default_retry_delay_ms() -> u64 {
    5000
}

fn default_freq_workers() -> usize {
    4
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            chunk_size: default_chunk_size(),
            batch_size: default_batch_size(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            tokens_dir: default_tokens_dir(),
            global_freq_path: default_global_freq_path(),
            buffer_path: default_buffer_path(),
            log_path: default_log_path(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            workers: default_freq_workers(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LexidexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// Priority order for the file itself:
    /// 1. Explicit path (e.g. from `--config`)
    /// 2. LEXIDEX_CONFIG env var
    /// 3. ./lexidex.toml in the working directory
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(path) = env::var("LEXIDEX_CONFIG") {
            Self::from_file(path)?
        } else if Path::new("lexidex.toml").exists() {
            Self::from_file("lexidex.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(ext) = env::var("LEXIDEX_EXTENSION") {
            self.ingest.extension = ext;
        }
        if let Ok(chunk_size) = env::var("LEXIDEX_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.ingest.chunk_size = size;
            }
        }
        if let Ok(batch_size) = env::var("LEXIDEX_BATCH_SIZE") {
            if let Ok(size) = batch_size.parse() {
                self.ingest.batch_size = size;
            }
        }
        if let Ok(max_size) = env::var("LEXIDEX_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.ingest.max_file_size_mb = size;
            }
        }

        if let Ok(db_path) = env::var("LEXIDEX_DB_PATH") {
            self.store.db_path = PathBuf::from(db_path);
        }

        if let Ok(attempts) = env::var("LEXIDEX_RETRY_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.retry.max_attempts = n;
            }
        }
        if let Ok(delay) = env::var("LEXIDEX_RETRY_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.retry.delay_ms = ms;
            }
        }

        if let Ok(workers) = env::var("LEXIDEX_FREQ_WORKERS") {
            if let Ok(n) = workers.parse() {
                self.frequency.workers = n;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ingest.extension.is_empty() {
            return Err(LexidexError::ConfigError(
                "File extension must be non-empty".to_string(),
            ));
        }

        if self.ingest.chunk_size == 0 {
            return Err(LexidexError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.ingest.batch_size == 0 {
            return Err(LexidexError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(LexidexError::ConfigError(
                "Retry attempts must be non-zero".to_string(),
            ));
        }

        if self.frequency.workers == 0 {
            return Err(LexidexError::ConfigError(
                "Frequency workers must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Extension: .{}", self.ingest.extension);
        tracing::info!("  Chunk size: {} chars", self.ingest.chunk_size);
        tracing::info!("  Batch size: {} files", self.ingest.batch_size);
        tracing::info!("  Max file size: {} MB", self.ingest.max_file_size_mb);
        tracing::info!("  Chunk store: {:?}", self.store.db_path);
        tracing::info!("  Tokens dir: {:?}", self.artifacts.tokens_dir);
        tracing::info!("  Global artifact: {:?}", self.artifacts.global_freq_path);
        tracing::info!(
            "  Retry: {} attempts, {} ms delay",
            self.retry.max_attempts,
            self.retry.delay_ms
        );
        tracing::info!("  Frequency workers: {}", self.frequency.workers);
    }
}
