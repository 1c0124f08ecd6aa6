//! Prompt command - normalize free text into the query buffer artifact

use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::cli::output::{colors, print_output, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::freq::write_freq_artifact;
use crate::core::normalize::{token_frequencies, STOP_SET};

/// Arguments for the prompt command
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Prompt text (read from stdin when omitted)
    #[arg(long, short = 't')]
    pub text: Option<String>,
}

/// Prompt result response
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub unique_stems: usize,
    pub artifact: String,
}

/// Execute the prompt command
pub fn execute(
    args: PromptArgs,
    config: &Arc<Config>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match args.text {
        Some(text) => text,
        None => {
            print!("Enter prompt: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
    };

    let freq = token_frequencies(&text, &STOP_SET);
    if freq.is_empty() {
        print_warning("No valid words found in the prompt.");
    }

    write_freq_artifact(&config.artifacts.buffer_path, &freq)?;

    let response = PromptResponse {
        unique_stems: freq.len(),
        artifact: config.artifacts.buffer_path.display().to_string(),
    };

    if print_output(&response, format) {
        return Ok(());
    }

    println!(
        "{} {} stems written to {}",
        colors::success("Prompt tokenized:"),
        colors::number(&response.unique_stems.to_string()),
        colors::file_path(&response.artifact)
    );

    Ok(())
}
