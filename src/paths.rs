//! Path utilities for determining data storage locations.
//!
//! The database and log file live under the platform's local data directory
//! (`~/.local/share/todolist/` on Linux); the config file lives under the
//! platform config directory.

use std::path::PathBuf;

/// The directory name used under the platform data and config directories.
const APP_DIR_NAME: &str = "todolist";

/// The database filename.
pub const DATABASE_FILENAME: &str = "todolist.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// The log filename, placed in the `logs` subdirectory of the data directory.
pub const LOG_FILENAME: &str = "todolist.log";

/// Get the base data directory.
///
/// Returns `None` if the platform has no local data directory.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Get the default database path.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the default log file path.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("logs").join(LOG_FILENAME))
}

/// Get the default config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
}
