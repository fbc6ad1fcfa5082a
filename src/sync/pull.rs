//! Pull: read current store values into entries

use serde::Serialize;

use super::{EntryFailure, SyncError};
use crate::backend::{PreferenceBackend, PreferenceHandle};
use crate::domain::{ConfigEntry, ValueType};

/// Outcome of a pull
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullReport {
    /// Updated entries, in input order
    pub entries: Vec<ConfigEntry>,

    /// Entries that could not be read
    pub failures: Vec<EntryFailure>,
}

impl PullReport {
    /// Number of entries pulled with a value
    pub fn pulled(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_some()).count()
    }

    /// Summary error when any entry failed; the entries are still usable
    pub fn aggregate_error(&self) -> Option<SyncError> {
        if self.failures.is_empty() {
            return None;
        }
        Some(SyncError::PartialPull {
            failed: self.failures.len(),
            total: self.entries.len() + self.dropped(),
        })
    }

    fn dropped(&self) -> usize {
        self.failures.iter().filter(|f| !f.retained).count()
    }
}

/// Reads the current value and type of every entry from the store.
///
/// Each entry is handled on its own:
/// - entries with an empty domain or key are dropped
/// - a failed read keeps the entry with no value
/// - a failed type read falls back to `string`
/// - boolean values are rewritten as `true`/`false`
pub fn pull<B>(entries: &[ConfigEntry], backend: &B) -> PullReport
where
    B: PreferenceBackend + ?Sized,
{
    let mut report = PullReport::default();

    for entry in entries {
        if let Err(e) = entry.validate() {
            report
                .failures
                .push(EntryFailure::new(entry, e.code(), e.to_string(), false));
            continue;
        }

        let handle = PreferenceHandle::new(backend, &entry.domain, &entry.key);

        let raw = match handle.read() {
            Ok(raw) => raw,
            Err(e) => {
                report
                    .failures
                    .push(EntryFailure::new(entry, e.code(), e.to_string(), true));
                report.entries.push(ConfigEntry {
                    value: None,
                    ..entry.clone()
                });
                continue;
            }
        };

        let value = normalize_raw(&raw);

        let value_type = handle.read_type().unwrap_or_else(|e| {
            tracing::debug!("{}; assuming string", e);
            ValueType::String
        });

        let value = match value_type {
            ValueType::Boolean => ValueType::canonical_bool(&value)
                .map(str::to_string)
                .unwrap_or(value),
            _ => value,
        };

        tracing::debug!(
            "Pulled {} {} = {} ({})",
            entry.domain,
            entry.key,
            value,
            value_type
        );

        report.entries.push(ConfigEntry {
            domain: entry.domain.clone(),
            key: entry.key.clone(),
            value: Some(value),
            value_type,
        });
    }

    report
}

// Multi-line values (arrays, dicts) become a single line.
fn normalize_raw(raw: &str) -> String {
    raw.replace(['\r', '\n'], "").trim().to_string()
}
