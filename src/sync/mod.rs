//! # Sync Engine
//!
//! Moves values between the entry file and the preference store.
//!
//! | Direction | Function | Effect |
//! |-----------|----------|--------|
//! | Pull | [`pull`] | Store values replace entry values |
//! | Push | [`push`] | Entry values are written to the store |
//!
//! Entries are processed one at a time and never share state, so a failure
//! on one entry is recorded and the rest of the batch carries on.

mod pull;
mod push;

use serde::Serialize;
use thiserror::Error;

use crate::domain::ConfigEntry;

pub use pull::{pull, PullReport};
pub use push::{effective_value, push, PushReport};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Failed to read {failed} of {total} entries")]
    PartialPull { failed: usize, total: usize },
}

/// A single entry that could not be synchronized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub domain: String,
    pub key: String,

    /// Numeric error code, see [`BackendError::code`](crate::backend::BackendError::code)
    pub code: u16,
    pub reason: String,

    /// Whether the entry was kept in the output
    pub retained: bool,
}

impl EntryFailure {
    fn new(entry: &ConfigEntry, code: u16, reason: String, retained: bool) -> Self {
        tracing::warn!("[ERROR-{:04}] {}", code, reason);
        Self {
            domain: entry.domain.clone(),
            key: entry.key.clone(),
            code,
            reason,
            retained,
        }
    }
}
