//! # Preference Backend
//!
//! The preference store is only reachable through an external program
//! (`defaults` on macOS). The sync engine talks to it through the
//! [`PreferenceBackend`] trait, one `(domain, key)` at a time.
//!
//! ```text
//! sync::pull / sync::push
//!        │
//!        ├── PreferenceHandle (domain, key)    rejects empty identifiers,
//!        │                                     normalizes booleans
//!        └── PreferenceBackend
//!              ├── DefaultsBackend             spawns `defaults read|read-type|write`
//!              └── MemoryBackend               in-process store for tests
//! ```
//!
//! ## Key Types
//!
//! - [`PreferenceBackend`] - Read, read-type and write for a single setting
//! - [`PreferenceHandle`] - A backend bound to one `(domain, key)`
//! - [`DefaultsBackend`] - Process-backed implementation
//! - [`MemoryBackend`] - In-memory implementation

mod defaults;
mod memory;

use thiserror::Error;

use crate::domain::ValueType;

pub use defaults::{parse_type_output, write_args, DefaultsBackend};
pub use memory::MemoryBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Domain and key cannot be empty (domain: '{domain}', key: '{key}')")]
    EmptyIdentifier { domain: String, key: String },

    #[error("Failed to read {domain} {key}: {reason}")]
    Read {
        domain: String,
        key: String,
        reason: String,
    },

    #[error("Failed to read type of {domain} {key}: {reason}")]
    ReadType {
        domain: String,
        key: String,
        reason: String,
    },

    #[error("Failed to write {domain} {key}: {reason}")]
    Write {
        domain: String,
        key: String,
        reason: String,
    },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl BackendError {
    /// Stable numeric code, shown as `ERROR-NNNN` in logs and reports
    ///
    /// | Code | Error |
    /// |------|-------|
    /// | 6 | Empty domain or key |
    /// | 7 | Read or type read failed |
    /// | 8 | Write failed |
    /// | 9 | Program could not be run |
    pub fn code(&self) -> u16 {
        match self {
            BackendError::EmptyIdentifier { .. } => 6,
            BackendError::Read { .. } | BackendError::ReadType { .. } => 7,
            BackendError::Write { .. } => 8,
            BackendError::Spawn { .. } => 9,
        }
    }
}

/// Access to the external preference store
pub trait PreferenceBackend {
    /// Reads the raw textual value of a setting
    fn read(&self, domain: &str, key: &str) -> Result<String, BackendError>;

    /// Reads the type of a setting
    fn read_type(&self, domain: &str, key: &str) -> Result<ValueType, BackendError>;

    /// Writes a value with the given type
    fn write(
        &self,
        domain: &str,
        key: &str,
        value: &str,
        value_type: ValueType,
    ) -> Result<(), BackendError>;

    /// Binds the backend to one setting
    fn handle<'a>(&'a self, domain: &'a str, key: &'a str) -> PreferenceHandle<'a, Self>
    where
        Self: Sized,
    {
        PreferenceHandle::new(self, domain, key)
    }
}

/// A backend bound to a single `(domain, key)`
///
/// Every operation fails with [`BackendError::EmptyIdentifier`] before
/// reaching the backend when the domain or key is empty.
pub struct PreferenceHandle<'a, B: PreferenceBackend + ?Sized> {
    backend: &'a B,
    domain: &'a str,
    key: &'a str,
}

impl<'a, B: PreferenceBackend + ?Sized> PreferenceHandle<'a, B> {
    pub fn new(backend: &'a B, domain: &'a str, key: &'a str) -> Self {
        Self {
            backend,
            domain,
            key,
        }
    }

    pub fn domain(&self) -> &str {
        self.domain
    }

    pub fn key(&self) -> &str {
        self.key
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.domain.is_empty() || self.key.is_empty() {
            return Err(BackendError::EmptyIdentifier {
                domain: self.domain.to_string(),
                key: self.key.to_string(),
            });
        }
        Ok(())
    }

    pub fn read(&self) -> Result<String, BackendError> {
        self.check()?;
        self.backend.read(self.domain, self.key)
    }

    pub fn read_type(&self) -> Result<ValueType, BackendError> {
        self.check()?;
        self.backend.read_type(self.domain, self.key)
    }

    /// Writes a value, canonicalizing booleans to `true`/`false` first
    pub fn write(&self, value: &str, value_type: ValueType) -> Result<(), BackendError> {
        self.check()?;

        let value = match value_type {
            ValueType::Boolean => ValueType::canonical_bool(value).unwrap_or(value),
            _ => value,
        };

        self.backend.write(self.domain, self.key, value, value_type)
    }
}
