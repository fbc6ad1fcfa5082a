//! Preference entry model
//!
//! One entry is one line of the entry file and one setting in the
//! preference store, addressed by `(domain, key)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ValueType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Invalid line {line_number}: expected 'DOMAIN KEY [[-TYPE] VALUE]', got '{line}'")]
    MalformedLine { line_number: usize, line: String },

    #[error("Domain and key cannot be empty (domain: '{domain}', key: '{key}')")]
    EmptyIdentifier { domain: String, key: String },
}

impl EntryError {
    /// Stable numeric code, shown as `ERROR-NNNN` in logs and reports
    pub fn code(&self) -> u16 {
        match self {
            EntryError::EmptyIdentifier { .. } => 6,
            EntryError::MalformedLine { .. } => 10,
        }
    }
}

/// A tracked preference setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Preference namespace, usually a bundle identifier
    pub domain: String,

    /// Setting name within the domain
    pub key: String,

    /// Current value; `None` means tracked but not yet known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// How the value is written to the store
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
}

impl ConfigEntry {
    /// Creates an entry with no value and the default type
    pub fn new(domain: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            key: key.into(),
            value: None,
            value_type: ValueType::default(),
        }
    }

    /// Sets the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the type
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Checks that the entry can be addressed in the store
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.domain.is_empty() || self.key.is_empty() {
            return Err(EntryError::EmptyIdentifier {
                domain: self.domain.clone(),
                key: self.key.clone(),
            });
        }
        Ok(())
    }

    /// Returns the value for display, `(unset)` when absent
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("(unset)")
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.domain,
            self.key,
            self.value_type,
            self.display_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let malformed = EntryError::MalformedLine {
            line_number: 1,
            line: "x".to_string(),
        };
        let empty = EntryError::EmptyIdentifier {
            domain: String::new(),
            key: "k".to_string(),
        };

        assert_eq!(malformed.code(), 10);
        assert_eq!(empty.code(), 6);
    }

    #[test]
    fn new_entry_has_no_value() {
        let entry = ConfigEntry::new("com.apple.dock", "autohide");

        assert_eq!(entry.value, None);
        assert_eq!(entry.value_type, ValueType::String);
    }

    #[test]
    fn absent_and_empty_values_differ() {
        let absent = ConfigEntry::new("d", "k");
        let empty = ConfigEntry::new("d", "k").with_value("");

        assert_ne!(absent, empty);
    }

    #[test]
    fn validate_rejects_empty_identifiers() {
        assert!(ConfigEntry::new("com.apple.dock", "autohide").validate().is_ok());

        let err = ConfigEntry::new("", "autohide").validate().unwrap_err();
        assert!(matches!(err, EntryError::EmptyIdentifier { .. }));

        assert!(ConfigEntry::new("com.apple.dock", "").validate().is_err());
    }

    #[test]
    fn display_shows_unset() {
        let entry = ConfigEntry::new("com.apple.dock", "tilesize").with_type(ValueType::Integer);
        assert_eq!(entry.to_string(), "com.apple.dock tilesize [integer] (unset)");

        let entry = entry.with_value("48");
        assert_eq!(entry.to_string(), "com.apple.dock tilesize [integer] 48");
    }

    #[test]
    fn json_serialization() {
        let entry = ConfigEntry::new("com.apple.dock", "autohide")
            .with_value("true")
            .with_type(ValueType::Boolean);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"boolean\""));

        let parsed: ConfigEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
