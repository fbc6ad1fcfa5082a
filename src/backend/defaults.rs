//! `defaults` command backend
//!
//! Runs the OS `defaults` program directly (no shell), so values with spaces
//! or quotes are passed through as single arguments.

use std::process::{Command, Output};

use super::{BackendError, PreferenceBackend};
use crate::domain::ValueType;

/// Backend that spawns the `defaults` program for every operation
#[derive(Debug, Clone)]
pub struct DefaultsBackend {
    program: String,
}

impl DefaultsBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<Output, BackendError> {
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr
    }
}

/// Parses `defaults read-type` output (`Type is boolean`).
///
/// Whitespace runs and case are tolerated; unrecognized output maps to
/// [`ValueType::String`].
pub fn parse_type_output(output: &str) -> ValueType {
    let tokens: Vec<&str> = output.split_whitespace().collect();

    match tokens.as_slice() {
        [t, is, name, ..] if t.eq_ignore_ascii_case("type") && is.eq_ignore_ascii_case("is") => {
            ValueType::from_os_name(name)
        }
        _ => ValueType::String,
    }
}

/// Builds the arguments for `defaults write`.
///
/// Array and dict values in plist text form (`( a, b )`, `{ k = v; }`, as
/// printed by `defaults read`) are passed as one argument without a type
/// flag so `defaults` parses the structure itself. Other array and dict
/// values are passed as one argument per whitespace-separated token, which is
/// how `defaults` expects `-array a b c` and `-dict k v`.
pub fn write_args(domain: &str, key: &str, value: &str, value_type: ValueType) -> Vec<String> {
    let mut args = vec!["write".to_string(), domain.to_string(), key.to_string()];

    match value_type {
        ValueType::Array | ValueType::Dict if is_plist_text(value) => {
            args.push(value.trim().to_string());
        }
        ValueType::Array | ValueType::Dict => {
            args.push(value_type.write_flag().to_string());
            args.extend(value.split_whitespace().map(str::to_string));
        }
        _ => {
            args.push(value_type.write_flag().to_string());
            args.push(value.to_string());
        }
    }

    args
}

fn is_plist_text(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with('(') || value.starts_with('{')
}

impl PreferenceBackend for DefaultsBackend {
    fn read(&self, domain: &str, key: &str) -> Result<String, BackendError> {
        let output = self.run(&["read".to_string(), domain.to_string(), key.to_string()])?;

        if !output.status.success() {
            return Err(BackendError::Read {
                domain: domain.to_string(),
                key: key.to_string(),
                reason: failure_reason(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn read_type(&self, domain: &str, key: &str) -> Result<ValueType, BackendError> {
        let output = self.run(&[
            "read-type".to_string(),
            domain.to_string(),
            key.to_string(),
        ])?;

        if !output.status.success() {
            return Err(BackendError::ReadType {
                domain: domain.to_string(),
                key: key.to_string(),
                reason: failure_reason(&output),
            });
        }

        Ok(parse_type_output(&String::from_utf8_lossy(&output.stdout)))
    }

    fn write(
        &self,
        domain: &str,
        key: &str,
        value: &str,
        value_type: ValueType,
    ) -> Result<(), BackendError> {
        let output = self.run(&write_args(domain, key, value, value_type))?;

        if !output.status.success() {
            return Err(BackendError::Write {
                domain: domain.to_string(),
                key: key.to_string(),
                reason: failure_reason(&output),
            });
        }

        Ok(())
    }
}
