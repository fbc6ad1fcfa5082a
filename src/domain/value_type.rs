//! Type tags for preference values
//!
//! The entry file records a type next to each value so that values can be
//! written back to the preference store with the right flag. The store itself
//! is loosely typed, so most of the work here is converting between the
//! textual forms each side understands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix that marks a type token in the entry file (`-boolean`, `-int`, ...)
pub const TYPE_MARKER: char = '-';

#[derive(Debug, Error, PartialEq)]
#[error("Unknown value type: '{0}'")]
pub struct UnknownValueType(pub String);

/// Type of a preference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    Integer,
    Float,
    Date,
    Data,
    Array,
    Dict,
}

impl ValueType {
    /// All type tags, in the order they are documented
    pub const ALL: [ValueType; 8] = [
        ValueType::String,
        ValueType::Boolean,
        ValueType::Integer,
        ValueType::Float,
        ValueType::Date,
        ValueType::Data,
        ValueType::Array,
        ValueType::Dict,
    ];

    /// Canonical name used in the entry file
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Date => "date",
            ValueType::Data => "data",
            ValueType::Array => "array",
            ValueType::Dict => "dict",
        }
    }

    /// Returns true for the type assumed when none is recorded
    pub fn is_default(&self) -> bool {
        *self == ValueType::String
    }

    /// Parses a marked token such as `-boolean`.
    ///
    /// Returns `None` when the token has no marker or names an unknown type,
    /// in which case the token is ordinary value text.
    pub fn from_marked(token: &str) -> Option<Self> {
        token
            .strip_prefix(TYPE_MARKER)
            .and_then(|name| name.parse().ok())
    }

    /// Renders the type with its marker (`-boolean`)
    pub fn marked(&self) -> String {
        format!("{}{}", TYPE_MARKER, self.as_str())
    }

    /// Maps a type name reported by the OS `defaults read-type` command.
    ///
    /// Unknown names fall back to [`ValueType::String`].
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "integer" => ValueType::Integer,
            "boolean" => ValueType::Boolean,
            "float" | "real" => ValueType::Float,
            "date" => ValueType::Date,
            "data" => ValueType::Data,
            "array" => ValueType::Array,
            "dictionary" => ValueType::Dict,
            _ => ValueType::String,
        }
    }

    /// Flag understood by `defaults write` for this type
    pub fn write_flag(&self) -> &'static str {
        match self {
            ValueType::String => "-string",
            ValueType::Boolean => "-bool",
            ValueType::Integer => "-int",
            ValueType::Float => "-float",
            ValueType::Date => "-date",
            ValueType::Data => "-data",
            ValueType::Array => "-array",
            ValueType::Dict => "-dict",
        }
    }

    /// Infers a type from the literal text of a value.
    ///
    /// Returns the inferred type together with the value to write, which
    /// differs from the input only when surrounding quotes were stripped.
    pub fn infer(text: &str) -> (ValueType, String) {
        let value = text.trim();

        if let Some(inner) = strip_quotes(value) {
            return (ValueType::String, inner.to_string());
        }

        let inferred = if matches!(value, "true" | "false" | "1" | "0") {
            ValueType::Boolean
        } else if value.parse::<i64>().is_ok() {
            ValueType::Integer
        } else if looks_like_float(value) {
            ValueType::Float
        } else {
            ValueType::String
        };

        (inferred, value.to_string())
    }

    /// Canonical textual boolean for a store value.
    ///
    /// The store reports booleans as `1`/`0`; the entry file prefers
    /// `true`/`false`. Returns `None` for text that is not a boolean.
    pub fn canonical_bool(text: &str) -> Option<&'static str> {
        match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some("true"),
            "0" | "false" | "no" => Some("false"),
            _ => None,
        }
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find(|q| value.starts_with(*q) && value.ends_with(*q))
        .map(|_| &value[1..value.len() - 1])
}

// `f64::from_str` also accepts `inf` and `nan`, which are words here.
fn looks_like_float(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ValueType::String),
            "boolean" | "bool" => Ok(ValueType::Boolean),
            "integer" | "int" => Ok(ValueType::Integer),
            "float" | "real" => Ok(ValueType::Float),
            "date" => Ok(ValueType::Date),
            "data" => Ok(ValueType::Data),
            "array" => Ok(ValueType::Array),
            "dict" | "dictionary" => Ok(ValueType::Dict),
            _ => Err(UnknownValueType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_names() {
        for ty in ValueType::ALL {
            assert_eq!(ty.as_str().parse::<ValueType>().unwrap(), ty);
        }
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("int".parse::<ValueType>().unwrap(), ValueType::Integer);
        assert_eq!("bool".parse::<ValueType>().unwrap(), ValueType::Boolean);
        assert_eq!("real".parse::<ValueType>().unwrap(), ValueType::Float);
        assert_eq!("dictionary".parse::<ValueType>().unwrap(), ValueType::Dict);
        assert_eq!("BOOLEAN".parse::<ValueType>().unwrap(), ValueType::Boolean);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "number".parse::<ValueType>(),
            Err(UnknownValueType("number".to_string()))
        );
    }

    #[test]
    fn marked_tokens() {
        assert_eq!(ValueType::from_marked("-boolean"), Some(ValueType::Boolean));
        assert_eq!(ValueType::from_marked("-int"), Some(ValueType::Integer));
        assert_eq!(ValueType::from_marked("boolean"), None);
        assert_eq!(ValueType::from_marked("-1"), None);
        assert_eq!(ValueType::from_marked("-"), None);
        assert_eq!(ValueType::Dict.marked(), "-dict");
    }

    #[test]
    fn os_names() {
        assert_eq!(ValueType::from_os_name("boolean"), ValueType::Boolean);
        assert_eq!(ValueType::from_os_name("Dictionary"), ValueType::Dict);
        assert_eq!(ValueType::from_os_name(" real "), ValueType::Float);
        assert_eq!(ValueType::from_os_name("url"), ValueType::String);
    }

    #[test]
    fn infer_literals() {
        assert_eq!(ValueType::infer("42"), (ValueType::Integer, "42".to_string()));
        assert_eq!(ValueType::infer("-7"), (ValueType::Integer, "-7".to_string()));
        assert_eq!(ValueType::infer("3.14"), (ValueType::Float, "3.14".to_string()));
        assert_eq!(ValueType::infer("true"), (ValueType::Boolean, "true".to_string()));
        assert_eq!(ValueType::infer("0"), (ValueType::Boolean, "0".to_string()));
        assert_eq!(
            ValueType::infer("\"hello world\""),
            (ValueType::String, "hello world".to_string())
        );
        assert_eq!(ValueType::infer("'1'"), (ValueType::String, "1".to_string()));
        assert_eq!(
            ValueType::infer("hello world"),
            (ValueType::String, "hello world".to_string())
        );
    }

    #[test]
    fn infer_does_not_treat_words_as_floats() {
        assert_eq!(ValueType::infer("inf").0, ValueType::String);
        assert_eq!(ValueType::infer("NaN").0, ValueType::String);
        assert_eq!(ValueType::infer("1e3").0, ValueType::Float);
    }

    #[test]
    fn infer_single_quote_char_is_string() {
        assert_eq!(ValueType::infer("\""), (ValueType::String, "\"".to_string()));
    }

    #[test]
    fn canonical_bools() {
        assert_eq!(ValueType::canonical_bool("1"), Some("true"));
        assert_eq!(ValueType::canonical_bool("YES"), Some("true"));
        assert_eq!(ValueType::canonical_bool(" 0\n"), Some("false"));
        assert_eq!(ValueType::canonical_bool("false"), Some("false"));
        assert_eq!(ValueType::canonical_bool("maybe"), None);
    }
}
