//! Output formatting for CLI commands

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::ConfigEntry;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
///
/// Human-facing text goes to stdout in text mode. In JSON mode stdout only
/// carries the final document; prompts and warnings go to stderr.
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a warning
    pub fn warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = json {
            println!("{}", json);
        }
    }

    /// Prints a titled list of entries (text only)
    pub fn entries(&self, title: &str, entries: &[ConfigEntry]) {
        if self.format != OutputFormat::Text {
            return;
        }

        println!("{}:", title);
        if entries.is_empty() {
            println!("  (no entries)");
        }
        for entry in entries {
            println!("- {}", entry);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Asks a yes/no question on stderr and reads the answer from stdin.
    ///
    /// Only `yes` or `y` (any case) confirm; end of input declines.
    pub fn confirm(&self, warning: &str, question: &str) -> Result<bool> {
        let stdin = io::stdin();
        self.confirm_with(warning, question, &mut stdin.lock())
    }

    fn confirm_with(
        &self,
        warning: &str,
        question: &str,
        input: &mut impl BufRead,
    ) -> Result<bool> {
        let mut stderr = io::stderr();
        writeln!(stderr, "Warning: {}", warning).context("Failed to write prompt")?;
        write!(stderr, "{} (yes/no): ", question).context("Failed to write prompt")?;
        stderr.flush().context("Failed to write prompt")?;

        let mut response = String::new();
        input
            .read_line(&mut response)
            .context("Failed to read confirmation")?;

        Ok(matches!(
            response.trim().to_ascii_lowercase().as_str(),
            "yes" | "y"
        ))
    }
}
