//! Task model types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier. Never reused once handed out.
pub type TaskId = i64;

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier assigned on insert.
    pub id: TaskId,
    /// Text of the task.
    pub value: String,
    /// Display rank; lower sorts first and the newest task has rank 1.
    pub sort_order: i64,
    /// Whether the task has been completed.
    pub completed: bool,
}

/// Check that task text is usable, returning it unchanged.
///
/// Text that is empty or only whitespace is rejected.
///
/// # Errors
///
/// Returns [`Error::EmptyValue`] for blank text.
pub fn validate_value(value: &str) -> Result<&str> {
    if value.trim().is_empty() {
        return Err(Error::EmptyValue);
    }
    Ok(value)
}
