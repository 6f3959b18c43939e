//! Configuration management
//!
//! Loads loader settings from a JSON config file (database location plus
//! the station list), with sensible defaults when no file exists. CLI
//! flags override whatever the file provides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME, DEFAULT_DATABASE_FILENAME, DEFAULT_STATIONS};
use crate::{Error, Result};

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Path of the SQLite observation database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Station codes processed when the CLI names none
    #[serde(default = "default_stations")]
    pub stations: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            stations: default_stations(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist and parse; with no explicit
    /// path, the default location is read if present, otherwise defaults
    /// apply.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    debug!("No config file at {}; using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        Self::from_file(&path)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file location under the user config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILENAME)
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(DEFAULT_DATABASE_FILENAME)
}

fn default_stations() -> Vec<String> {
    DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_carry_station_list() {
        let config = Config::default();
        assert_eq!(config.stations, vec!["SILL", "PRIO", "VILA"]);
        assert!(config
            .database_path
            .to_string_lossy()
            .ends_with("waves.sqlite"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"database_path": "/tmp/test.sqlite", "stations": ["PRIO"]}"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/test.sqlite"));
        assert_eq!(config.stations, vec!["PRIO"]);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"stations": ["VILA"]}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.stations, vec!["VILA"]);
        assert_eq!(config.database_path, Config::default().database_path);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.json")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
