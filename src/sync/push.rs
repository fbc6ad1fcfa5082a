//! Push: write entry values into the store

use serde::Serialize;

use super::EntryFailure;
use crate::backend::{PreferenceBackend, PreferenceHandle};
use crate::domain::{ConfigEntry, ValueType};

/// Outcome of a push
#[derive(Debug, Clone, Default, Serialize)]
pub struct PushReport {
    /// Number of entries written
    pub written: usize,

    /// Number of entries skipped because they have no value
    pub skipped: usize,

    /// Entries that could not be written
    pub failures: Vec<EntryFailure>,
}

impl PushReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves the type and value to write for an entry.
///
/// A recorded non-string type is used as-is. Otherwise the type is inferred
/// from the value text, which also strips surrounding quotes.
pub fn effective_value(entry: &ConfigEntry, value: &str) -> (ValueType, String) {
    if entry.value_type.is_default() {
        ValueType::infer(value)
    } else {
        (entry.value_type, value.to_string())
    }
}

/// Writes every entry that has a value into the store.
///
/// A failed write is logged and recorded; the remaining entries are still
/// written.
pub fn push<B>(entries: &[ConfigEntry], backend: &B) -> PushReport
where
    B: PreferenceBackend + ?Sized,
{
    let mut report = PushReport::default();

    for entry in entries {
        let Some(value) = entry.value.as_deref() else {
            tracing::info!("Skipping {} {}: no value", entry.domain, entry.key);
            report.skipped += 1;
            continue;
        };

        let (value_type, value) = effective_value(entry, value);
        let handle = PreferenceHandle::new(backend, &entry.domain, &entry.key);

        match handle.write(&value, value_type) {
            Ok(()) => {
                tracing::debug!(
                    "Wrote {} {} = {} ({})",
                    entry.domain,
                    entry.key,
                    value,
                    value_type
                );
                report.written += 1;
            }
            Err(e) => {
                report
                    .failures
                    .push(EntryFailure::new(entry, e.code(), e.to_string(), true));
            }
        }
    }

    report
}
