//! # Storage Layer
//!
//! Persistence for the entry file and the tool's own configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Entries | `DOMAIN KEY [[-TYPE] VALUE]` per line | `~/.mdefaults` |
//! | Settings | TOML | `~/.config/mdefaults/config.toml` |
//!
//! Entry file writes are atomic (temp file + rename) and locked with `fs2`.

mod config;
mod entry_file;

pub use config::{Settings, SettingsError, DEFAULT_BACKEND_PROGRAM, ENTRY_FILE_NAME};
pub use entry_file::{parse, parse_with_diagnostics, render, EntryFile, FileError};
