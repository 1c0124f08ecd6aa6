//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::cli::OutputFormat;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Print serializable data based on the selected output format
pub fn print_output<T: serde::Serialize>(data: &T, format: OutputFormat) -> bool {
    match format {
        OutputFormat::Json => {
            match serde_json::to_string_pretty(data) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to serialize output: {e}"),
            }
            true
        }
        OutputFormat::Human => false,
    }
}

/// Print a warning message to stderr
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", colors::warning("Warning:"), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(0.25), "250ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(2.5), "2.50s");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(95.0), "1m 35.0s");
    }
}
