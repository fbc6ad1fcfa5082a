//! Line-oriented storage for preference entries
//!
//! Entries live in `~/.mdefaults`, one per line:
//!
//! ```text
//! com.apple.dock autohide -boolean true
//! com.apple.dock tilesize -integer 48
//! com.apple.finder FXPreferredViewStyle Nlsv
//! com.apple.screencapture location
//! ```
//!
//! The type token is optional. Lines without one are the older format and
//! read as strings; lines with only a domain and key track a setting whose
//! value has not been pulled yet.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::{ConfigEntry, EntryError, ValueType, TYPE_MARKER};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read entry file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write entry file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn read(path: &Path, source: io::Error) -> Self {
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write(path: &Path, source: io::Error) -> Self {
        FileError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parses entry file text, logging and skipping malformed lines
pub fn parse(text: &str) -> Vec<ConfigEntry> {
    let (entries, errors) = parse_with_diagnostics(text);
    for error in &errors {
        tracing::warn!("{}", error);
    }
    entries
}

/// Parses entry file text, returning malformed lines alongside the entries
pub fn parse_with_diagnostics(text: &str) -> (Vec<ConfigEntry>, Vec<EntryError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => errors.push(EntryError::MalformedLine {
                line_number: index + 1,
                line: line.to_string(),
            }),
        }
    }

    (entries, errors)
}

fn parse_line(line: &str) -> Option<ConfigEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let entry = ConfigEntry::new(tokens[0], tokens[1]);

    let entry = match &tokens[2..] {
        [] => entry,
        [only] => match ValueType::from_marked(only) {
            // Typed but not yet pulled
            Some(value_type) => entry.with_type(value_type),
            None => entry.with_value(*only),
        },
        [first, rest @ ..] => match ValueType::from_marked(first) {
            Some(value_type) => entry.with_type(value_type).with_value(rest.join(" ")),
            None => entry.with_value(tokens[2..].join(" ")),
        },
    };

    Some(entry)
}

/// Renders entries in the entry file format
///
/// Strings are written without a type token unless the value itself starts
/// with the type marker. Entries without a domain or key are dropped.
pub fn render(entries: &[ConfigEntry]) -> String {
    let mut content = String::new();

    for entry in entries {
        if let Err(e) = entry.validate() {
            tracing::warn!("Skipping entry: {}", e);
            continue;
        }
        content.push_str(&render_line(entry));
        content.push('\n');
    }

    content
}

fn render_line(entry: &ConfigEntry) -> String {
    let mut parts = vec![entry.domain.clone(), entry.key.clone()];

    // Whitespace runs do not survive parsing, so collapse them up front.
    let value = entry
        .value
        .as_deref()
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|v| !v.is_empty());

    match value {
        None => {
            if !entry.value_type.is_default() {
                parts.push(entry.value_type.marked());
            }
        }
        Some(value) => {
            if !entry.value_type.is_default() || value.starts_with(TYPE_MARKER) {
                parts.push(entry.value_type.marked());
            }
            parts.push(value);
        }
    }

    parts.join(" ")
}

/// The on-disk entry file
pub struct EntryFile {
    path: PathBuf,
}

impl EntryFile {
    /// Creates a handle for the file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty file (and parent directories) if none exists
    pub fn ensure_exists(&self) -> Result<(), FileError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::write(&self.path, e))?;
        }

        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| FileError::write(&self.path, e))?;

        tracing::info!("Created empty entry file at {}", self.path.display());
        Ok(())
    }

    /// Reads all entries; a missing file reads as empty
    pub fn read_all(&self) -> Result<Vec<ConfigEntry>, FileError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path).map_err(|e| FileError::read(&self.path, e))?;

        file.lock_shared()
            .map_err(|e| FileError::read(&self.path, e))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| FileError::read(&self.path, e))?;

        Ok(parse(&content))
    }

    /// Replaces the file contents with the given entries
    pub fn write_all(&self, entries: &[ConfigEntry]) -> Result<(), FileError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::write(&self.path, e))?;
        }

        let temp_path = self.temp_path();
        let content = render(entries);

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| FileError::write(&temp_path, e))?;

            file.lock_exclusive()
                .map_err(|e| FileError::write(&temp_path, e))?;

            file.write_all(content.as_bytes())
                .and_then(|_| file.flush())
                .map_err(|e| FileError::write(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| FileError::write(&self.path, e))?;

        tracing::debug!(
            "Wrote {} entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
