//! Configuration management for todolist.
//!
//! Settings live in an optional YAML file (by default
//! `<config dir>/todolist/config.yaml`). Every field is optional; a missing
//! file means "use the defaults".

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Path of the task database. Defaults to [`paths::default_db_path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset (e.g. "debug").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Path of the log file. Defaults to [`paths::default_log_path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load config from the default location, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Option<Self>> {
        match paths::default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load config from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)?;
        // An empty file is valid YAML for "no settings".
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Resolve the database path: the configured one, else the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataDir`] if nothing is configured and the platform
    /// has no data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        self.database.clone().or_else(paths::default_db_path).ok_or(Error::NoDataDir)
    }

    /// Resolve the log file path: the configured one, else the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataDir`] if nothing is configured and the platform
    /// has no data directory.
    pub fn log_path(&self) -> Result<PathBuf> {
        self.log_file.clone().or_else(paths::default_log_path).ok_or(Error::NoDataDir)
    }
}
