//! Lexidex CLI entry point
//!
//! # Examples
//!
//! ```bash
//! # Ingest a directory of .txt documents into the chunk store
//! lexidex ingest ~/documents
//!
//! # Re-run later, picking up only new files
//! lexidex ingest ~/documents --incremental
//!
//! # Derive per-document and global word-frequency artifacts
//! lexidex index
//!
//! # Prepare a query buffer from a prompt
//! lexidex prompt --text "distributed consensus protocols"
//! ```

use clap::Parser;
use lexidex::cli::output::colors;
use lexidex::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", colors::error("Error:"));
        std::process::exit(1);
    }
}
