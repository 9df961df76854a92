//! Error types for `todolist`.

/// Errors that can occur in the task store and its front ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Task text was empty.
    #[error("task text must not be empty")]
    EmptyValue,

    /// No platform data directory could be determined.
    #[error("could not determine a data directory for the task database")]
    NoDataDir,

    /// The logger could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// A store operation running off the async runtime failed to complete.
    #[error("Background task failed: {0}")]
    Background(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
