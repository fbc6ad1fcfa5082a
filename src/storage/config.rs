//! Configuration handling for mdefaults
//!
//! Settings are read from `~/.config/mdefaults/config.toml` (or the platform
//! equivalent). Every field is optional; command-line flags and environment
//! variables take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the entry file in the home directory
pub const ENTRY_FILE_NAME: &str = ".mdefaults";

/// Program used to talk to the preference store
pub const DEFAULT_BACKEND_PROGRAM: &str = "defaults";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not determine the home directory; pass --file explicitly")]
    NoHomeDir,
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Entry file location (defaults to `~/.mdefaults`)
    pub entries_file: Option<PathBuf>,

    /// Program invoked for `read`, `read-type` and `write`
    pub backend_program: String,

    /// Skip the confirmation prompt before overwriting the entry file
    pub assume_yes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entries_file: None,
            backend_program: DEFAULT_BACKEND_PROGRAM.to_string(),
            assume_yes: false,
        }
    }
}

impl Settings {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "mdefaults", "mdefaults")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads settings from the default location, falling back to defaults
    pub fn load() -> Result<Self, SettingsError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolves the entry file path
    pub fn entries_path(&self) -> Result<PathBuf, SettingsError> {
        if let Some(path) = &self.entries_file {
            return Ok(path.clone());
        }

        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(ENTRY_FILE_NAME))
            .ok_or(SettingsError::NoHomeDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.backend_program, "defaults");
        assert!(!settings.assume_yes);
        assert!(settings.entries_file.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
assume_yes = true
"#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert!(settings.assume_yes);
        assert_eq!(settings.backend_program, "defaults");
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
entries_file = "/tmp/prefs.txt"
backend_program = "/usr/local/bin/fake-defaults"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.entries_file, Some(PathBuf::from("/tmp/prefs.txt")));
        assert_eq!(settings.backend_program, "/usr/local/bin/fake-defaults");
        assert_eq!(
            settings.entries_path().unwrap(),
            PathBuf::from("/tmp/prefs.txt")
        );
    }

    #[test]
    fn load_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "assume_yes = \"sometimes\"").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn default_entries_path_is_in_home() {
        let settings = Settings::default();
        if let Ok(path) = settings.entries_path() {
            assert!(path.ends_with(ENTRY_FILE_NAME));
        }
    }
}
