//! Settings file
//!
//! Settings are read from `--settings <path>` when given, otherwise from
//! `<config_dir>/tabula/settings.json` if that file exists. Missing fields
//! fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter directive, e.g. `warn,tabula_schema=debug`
    pub filter: Option<String>,
    /// Emit JSON log lines
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    /// Catalog file used when `--catalog` is not passed
    pub catalog: Option<PathBuf>,
}

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("tabula"))
}

pub fn settings_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("settings.json"))
}

impl Settings {
    /// Load settings from an explicit path, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match settings_file() {
                Ok(default) if default.exists() => Self::load_from(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"logging": {{"filter": "debug", "json": true}}, "catalog": "shop.json"}}"#
        )
        .expect("write settings");

        let settings = Settings::load(Some(file.path())).expect("settings load");
        assert_eq!(settings.logging.filter.as_deref(), Some("debug"));
        assert!(settings.logging.json);
        assert_eq!(settings.catalog, Some(PathBuf::from("shop.json")));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{}}").expect("write settings");

        let settings = Settings::load(Some(file.path())).expect("settings load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = Settings::load(Some(&dir.path().join("nope.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "logging = true").expect("write settings");

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
