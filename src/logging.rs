//! File logging setup.
//!
//! Logs go to a file rather than stderr so they never interleave with the
//! interactive list display. The filter comes from `RUST_LOG`, then the
//! configured `log_level`, then `info`.

use crate::config::Config;
use crate::error::{Error, Result};
use log::info;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Filter used when neither `RUST_LOG` nor the config sets one.
const DEFAULT_FILTER: &str = "info";

/// Initialize logging to the file named by the config.
///
/// Returns the path of the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is already
/// installed.
pub fn init(config: &Config) -> Result<PathBuf> {
    let log_path = config.log_path()?;
    init_at(&log_path, config.log_level.as_deref())?;
    Ok(log_path)
}

/// Initialize logging to a specific file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is already
/// installed.
pub fn init_at(log_path: &Path, level: Option<&str>) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let target = Box::new(OpenOptions::new().create(true).append(true).open(log_path)?);

    let env = env_logger::Env::default().default_filter_or(level.unwrap_or(DEFAULT_FILTER));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    info!("Logging initialized, writing to: {}", log_path.display());
    Ok(())
}
