//! Schema initialization for the task database.

use crate::error::Result;
use log::info;
use rusqlite::Connection;

/// Name of the task table.
pub const TASKS_TABLE: &str = "tasks";

/// Statements that bring a database to the current schema.
///
/// `AUTOINCREMENT` keeps ids from being reused after the highest row is
/// deleted or the table is cleared.
const SCHEMA_SQL: &str = r"
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        value TEXT NOT NULL,
        sort_order INTEGER,
        completed BOOLEAN NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_tasks_sort_order ON tasks(sort_order);
";

/// Ensure the task table exists and the database uses WAL journaling.
///
/// Safe to call any number of times.
///
/// # Errors
///
/// Returns an error if `SQLite` rejects any of the schema statements.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    info!("Task schema ready");
    Ok(())
}
