//! SQLite chunk store.
//!
//! Two tables: `chunks` (one row per text chunk, ids assigned in
//! insertion order) and `documents` (one row per ingested file, locating
//! its chunk range). The store is the pipeline's only shared mutable
//! resource; every write goes through [`with_write_retry`], and
//! connections are never shared across concurrent callers — each
//! operation or worker opens and closes its own.

use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::core::config::RetryConfig;
use crate::core::error::{LexidexError, Result};
use crate::core::types::{ChunkRow, DocumentRecord};

/// Bounded-retry-with-delay policy for contended writes
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }
}

/// Open a connection to the chunk store, creating parent directories
/// as needed.
pub fn open(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Connection::open(db_path)?)
}

/// Create both tables if they do not exist yet
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS chunks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT NOT NULL,
            chunk_index INTEGER NOT NULL,
            chunk_text TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT NOT NULL UNIQUE,
            chunk_count INTEGER NOT NULL,
            starting_id INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Drop and recreate both tables. Destructive: loses all prior chunk
/// rows and document records.
pub fn reset_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS chunks;
        DROP TABLE IF EXISTS documents;
        "#,
    )?;
    init_schema(conn)
}

/// Run a fallible write, retrying on lock contention with a fixed
/// delay between attempts.
///
/// Only contention errors are retried (the pipeline intentionally runs
/// many concurrent writers against a store that permits one writer at a
/// time); any other failure propagates immediately. Exhausting the
/// ceiling surfaces as [`LexidexError::RetryExhausted`].
pub fn with_write_retry<T>(
    policy: &RetryPolicy,
    label: &str,
    mut op: impl FnMut() -> Result<T>,
) -> Result<T> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_contention() => {
                if attempt >= policy.max_attempts {
                    return Err(LexidexError::RetryExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                tracing::warn!(
                    "Store locked during {}. Attempt {}/{}, retrying in {:?}...",
                    label,
                    attempt,
                    policy.max_attempts,
                    policy.delay
                );
                thread::sleep(policy.delay);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Store a document's full chunk set in one transaction.
///
/// Opens its own connection per attempt; a failed attempt rolls back
/// by dropping the uncommitted transaction, so a document's chunk ids
/// are always contiguous once the commit lands.
pub fn store_chunks(
    db_path: &Path,
    policy: &RetryPolicy,
    file_name: &str,
    chunks: &[String],
) -> Result<usize> {
    with_write_retry(policy, "chunk insert", || {
        let mut conn = open(db_path)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO chunks (file_name, chunk_index, chunk_text) VALUES (?1, ?2, ?3)",
            )?;
            for (index, chunk) in chunks.iter().enumerate() {
                stmt.execute(params![file_name, index, chunk])?;
            }
        }
        tx.commit()?;
        Ok(chunks.len())
    })
}

/// Document keys already present in the chunk table
pub fn ingested_files(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT file_name FROM chunks")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut files = HashSet::new();
    for row in rows {
        files.insert(row?);
    }
    Ok(files)
}

/// Recompute the `documents` table from the chunk table.
///
/// One row per distinct file: chunk count and the id of its first
/// chunk. Returns the number of document records written.
pub fn materialize_documents(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM documents", [])?;
    let written = conn.execute(
        r#"
        INSERT INTO documents (file_name, chunk_count, starting_id)
        SELECT file_name, COUNT(*), MIN(id)
        FROM chunks
        GROUP BY file_name
        ORDER BY MIN(id)
        "#,
        [],
    )?;
    Ok(written)
}

/// All document records with at least one chunk
pub fn documents_with_chunks(conn: &Connection) -> Result<Vec<DocumentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, file_name, chunk_count, starting_id FROM documents WHERE chunk_count > 0",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(DocumentRecord {
            id: row.get(0)?,
            file_name: row.get(1)?,
            chunk_count: row.get::<_, i64>(2)? as usize,
            starting_id: row.get(3)?,
        })
    })?;

    let mut docs = Vec::new();
    for row in rows {
        docs.push(row?);
    }
    Ok(docs)
}

/// Stream a document's chunk texts through a callback.
///
/// Fetches exactly `chunk_count` rows starting at `starting_id` in
/// insertion order, one at a time, so no document's full chunk set is
/// ever materialized in memory.
pub fn for_each_chunk_text(
    conn: &Connection,
    doc: &DocumentRecord,
    mut f: impl FnMut(&str),
) -> Result<()> {
    let mut stmt = conn.prepare("SELECT chunk_text FROM chunks WHERE id >= ?1 ORDER BY id LIMIT ?2")?;
    let rows = stmt.query_map(params![doc.starting_id, doc.chunk_count as i64], |row| {
        row.get::<_, String>(0)
    })?;

    for row in rows {
        f(&row?);
    }
    Ok(())
}

/// Total chunk rows in the store
pub fn total_chunks(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// A document's chunk rows ordered by chunk index
pub fn chunks_for(conn: &Connection, file_name: &str) -> Result<Vec<ChunkRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, file_name, chunk_index, chunk_text FROM chunks WHERE file_name = ?1 ORDER BY chunk_index",
    )?;
    let rows = stmt.query_map(params![file_name], |row| {
        Ok(ChunkRow {
            id: row.get(0)?,
            file_name: row.get(1)?,
            chunk_index: row.get::<_, i64>(2)? as usize,
            chunk_text: row.get(3)?,
        })
    })?;

    let mut chunks = Vec::new();
    for row in rows {
        chunks.push(row?);
    }
    Ok(chunks)
}
