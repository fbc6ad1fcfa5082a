//! In-memory preference store
//!
//! Behaves like the `defaults` program: booleans are stored as `1`/`0` and
//! reads come back with a trailing newline. Individual settings can be made
//! to fail so that per-entry error handling can be exercised.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::{BackendError, PreferenceBackend};
use crate::domain::ValueType;

type SettingKey = (String, String);

/// A recorded write: domain, key, value, type
pub type WriteRecord = (String, String, String, ValueType);

#[derive(Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<SettingKey, (String, ValueType)>>,
    failing_reads: RefCell<HashSet<SettingKey>>,
    failing_type_reads: RefCell<HashSet<SettingKey>>,
    failing_writes: RefCell<HashSet<SettingKey>>,
    writes: RefCell<Vec<WriteRecord>>,
    calls: Cell<usize>,
}

fn setting(domain: &str, key: &str) -> SettingKey {
    (domain.to_string(), key.to_string())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value as the system would report it
    pub fn set(&self, domain: &str, key: &str, value: &str, value_type: ValueType) {
        self.values
            .borrow_mut()
            .insert(setting(domain, key), (stored_form(value, value_type), value_type));
    }

    /// Makes reads of a setting fail
    pub fn fail_reads(&self, domain: &str, key: &str) {
        self.failing_reads.borrow_mut().insert(setting(domain, key));
    }

    /// Makes type reads of a setting fail
    pub fn fail_type_reads(&self, domain: &str, key: &str) {
        self.failing_type_reads
            .borrow_mut()
            .insert(setting(domain, key));
    }

    /// Makes writes of a setting fail
    pub fn fail_writes(&self, domain: &str, key: &str) {
        self.failing_writes.borrow_mut().insert(setting(domain, key));
    }

    /// Returns the stored value and type of a setting
    pub fn get(&self, domain: &str, key: &str) -> Option<(String, ValueType)> {
        self.values.borrow().get(&setting(domain, key)).cloned()
    }

    /// Returns every successful write, in order
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.borrow().clone()
    }

    /// Number of calls that reached the store
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn stored_form(value: &str, value_type: ValueType) -> String {
    match value_type {
        ValueType::Boolean => match ValueType::canonical_bool(value) {
            Some("true") => "1".to_string(),
            Some(_) => "0".to_string(),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, domain: &str, key: &str) -> Result<String, BackendError> {
        self.record_call();
        let id = setting(domain, key);

        let error = |reason: &str| BackendError::Read {
            domain: domain.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if self.failing_reads.borrow().contains(&id) {
            return Err(error("simulated failure"));
        }

        self.values
            .borrow()
            .get(&id)
            .map(|(value, _)| format!("{}\n", value))
            .ok_or_else(|| error("does not exist"))
    }

    fn read_type(&self, domain: &str, key: &str) -> Result<ValueType, BackendError> {
        self.record_call();
        let id = setting(domain, key);

        let error = |reason: &str| BackendError::ReadType {
            domain: domain.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if self.failing_type_reads.borrow().contains(&id) {
            return Err(error("simulated failure"));
        }

        self.values
            .borrow()
            .get(&id)
            .map(|(_, value_type)| *value_type)
            .ok_or_else(|| error("does not exist"))
    }

    fn write(
        &self,
        domain: &str,
        key: &str,
        value: &str,
        value_type: ValueType,
    ) -> Result<(), BackendError> {
        self.record_call();
        let id = setting(domain, key);

        if self.failing_writes.borrow().contains(&id) {
            return Err(BackendError::Write {
                domain: domain.to_string(),
                key: key.to_string(),
                reason: "simulated failure".to_string(),
            });
        }

        self.writes.borrow_mut().push((
            domain.to_string(),
            key.to_string(),
            value.to_string(),
            value_type,
        ));
        self.set(domain, key, value, value_type);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_read_back_as_digits() {
        let backend = MemoryBackend::new();
        backend.set("com.apple.dock", "autohide", "true", ValueType::Boolean);

        assert_eq!(backend.read("com.apple.dock", "autohide").unwrap(), "1\n");
        assert_eq!(
            backend.read_type("com.apple.dock", "autohide").unwrap(),
            ValueType::Boolean
        );
    }

    #[test]
    fn missing_setting_fails() {
        let backend = MemoryBackend::new();

        assert!(matches!(
            backend.read("com.apple.dock", "nope"),
            Err(BackendError::Read { .. })
        ));
        assert!(matches!(
            backend.read_type("com.apple.dock", "nope"),
            Err(BackendError::ReadType { .. })
        ));
    }

    #[test]
    fn simulated_failures() {
        let backend = MemoryBackend::new();
        backend.set("d", "k", "v", ValueType::String);
        backend.fail_reads("d", "k");
        backend.fail_writes("d", "k");

        assert!(backend.read("d", "k").is_err());
        assert!(backend.write("d", "k", "x", ValueType::String).is_err());
        assert!(backend.writes().is_empty());
        assert_eq!(backend.get("d", "k"), Some(("v".to_string(), ValueType::String)));
        assert_eq!(backend.calls(), 2);
    }
}
