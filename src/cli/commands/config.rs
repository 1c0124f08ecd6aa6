//! Show-config command - print the effective configuration

use clap::Args;
use std::sync::Arc;

use crate::cli::output::print_output;
use crate::cli::OutputFormat;
use crate::core::config::Config;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the show-config command
pub fn execute(
    _args: ConfigArgs,
    config: &Arc<Config>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if print_output(config.as_ref(), format) {
        return Ok(());
    }

    let toml = toml::to_string_pretty(config.as_ref())?;
    println!("{toml}");

    Ok(())
}
