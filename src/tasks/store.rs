//! Task store trait and `SQLite` implementation.

use crate::error::Result;
use crate::tasks::models::{Task, TaskId};
use crate::tasks::schema;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Trait for ordered task storage.
///
/// Tasks are kept in rank order: the most recently inserted task has
/// `sort_order == 1` and every older task sits below it. Deleting a task
/// leaves a gap in the ranks that is never compacted.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Insert a task at the front of the list, shifting every other task down
    /// by one rank. Both steps commit together or not at all.
    fn insert_front(&self, value: &str) -> Result<Task>;

    /// Get a task by ID.
    fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Delete a task by ID. Returns false if no such task existed.
    fn delete_task(&self, id: TaskId) -> Result<bool>;

    /// Replace a task's text. Returns false if no such task existed.
    fn rename_task(&self, id: TaskId, value: &str) -> Result<bool>;

    /// Flip a task's completion flag based on its stored value.
    ///
    /// Returns the new state, or None if no such task existed.
    fn toggle_completed(&self, id: TaskId) -> Result<Option<bool>>;

    /// Delete every task. Returns the number of tasks removed.
    fn clear_all(&self) -> Result<usize>;

    /// List every task, lowest rank first.
    fn list_ordered(&self) -> Result<Vec<Task>>;
}

/// SQLite-based task store.
///
/// Each operation opens its own connection, so the store is cheap to clone
/// and safe to move between threads.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Create a new `SQLite` task store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Create a store, logging rather than returning a schema failure.
    ///
    /// The returned store may be unusable; its operations then fail with
    /// database errors instead of the process stopping at startup.
    #[must_use]
    pub fn open_lenient(db_path: impl AsRef<Path>) -> Self {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        if let Err(e) = store.init_schema() {
            error!("Failed to initialize task database {}: {e}", store.db_path.display());
        }
        store
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Connection::open(&self.db_path)?)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;
        schema::initialize(&conn)
    }

    /// Parse a task from a row.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            value: row.get(1)?,
            sort_order: row.get(2)?,
            completed: row.get(3)?,
        })
    }
}

impl TaskStore for SqliteTaskStore {
    fn insert_front(&self, value: &str) -> Result<Task> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        tx.execute("UPDATE tasks SET sort_order = sort_order + 1", [])?;
        tx.execute(
            "INSERT INTO tasks (value, sort_order, completed) VALUES (?1, 1, 0)",
            params![value],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        debug!("Inserted task {id} at the front");

        Ok(Task { id, value: value.to_string(), sort_order: 1, completed: false })
    }

    fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let conn = self.open()?;
        let task = conn
            .query_row(
                "SELECT id, value, sort_order, completed FROM tasks WHERE id = ?1",
                params![id],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }

    fn delete_task(&self, id: TaskId) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        debug!("Deleted task {id}: {rows} row(s)");
        Ok(rows > 0)
    }

    fn rename_task(&self, id: TaskId, value: &str) -> Result<bool> {
        let conn = self.open()?;
        let rows =
            conn.execute("UPDATE tasks SET value = ?1 WHERE id = ?2", params![value, id])?;
        debug!("Renamed task {id}: {rows} row(s)");
        Ok(rows > 0)
    }

    fn toggle_completed(&self, id: TaskId) -> Result<Option<bool>> {
        let conn = self.open()?;
        let completed = conn
            .query_row(
                "UPDATE tasks SET completed = NOT completed WHERE id = ?1 RETURNING completed",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        debug!("Toggled task {id}: {completed:?}");
        Ok(completed)
    }

    fn clear_all(&self) -> Result<usize> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM tasks", [])?;
        debug!("Cleared {rows} task(s)");
        Ok(rows)
    }

    fn list_ordered(&self) -> Result<Vec<Task>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, value, sort_order, completed FROM tasks ORDER BY sort_order ASC, id ASC",
        )?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteTaskStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::new(dir.path().join("tasks.db")).unwrap();
        (dir, store)
    }

    fn values(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.value.as_str()).collect()
    }

    fn ranks(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.sort_order).collect()
    }

    #[test]
    fn test_insert_front_returns_new_task() {
        let (_dir, store) = create_test_store();
        let task = store.insert_front("Buy milk").unwrap();

        assert_eq!(task.value, "Buy milk");
        assert_eq!(task.sort_order, 1);
        assert!(!task.completed);
        assert_eq!(store.get_task(task.id).unwrap(), Some(task));
    }

    #[test]
    fn test_insert_front_places_newest_first() {
        let (_dir, store) = create_test_store();
        store.insert_front("Buy milk").unwrap();
        store.insert_front("Walk dog").unwrap();

        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["Walk dog", "Buy milk"]);
        assert_eq!(ranks(&tasks), vec![1, 2]);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_insert_front_shifts_every_rank() {
        let (_dir, store) = create_test_store();
        for value in ["a", "b", "c"] {
            store.insert_front(value).unwrap();
        }
        store.insert_front("d").unwrap();

        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["d", "c", "b", "a"]);
        assert_eq!(ranks(&tasks), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_insert_front_rolls_back_rank_shift_on_failure() {
        let (_dir, store) = create_test_store();
        store.insert_front("first").unwrap();
        store.insert_front("second").unwrap();

        let conn = Connection::open(store.db_path()).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON tasks WHEN NEW.value = 'boom'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        assert!(store.insert_front("boom").is_err());

        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["second", "first"]);
        assert_eq!(ranks(&tasks), vec![1, 2]);
    }

    #[test]
    fn test_get_nonexistent_task() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.get_task(42).unwrap(), None);
    }

    #[test]
    fn test_delete_task_leaves_gap() {
        let (_dir, store) = create_test_store();
        store.insert_front("a").unwrap();
        let b = store.insert_front("b").unwrap();
        store.insert_front("c").unwrap();

        assert!(store.delete_task(b.id).unwrap());

        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["c", "a"]);
        assert_eq!(ranks(&tasks), vec![1, 3]);
    }

    #[test]
    fn test_delete_nonexistent_task_is_noop() {
        let (_dir, store) = create_test_store();
        store.insert_front("a").unwrap();

        assert!(!store.delete_task(999).unwrap());
        assert_eq!(store.list_ordered().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_after_delete_keeps_gap_below() {
        let (_dir, store) = create_test_store();
        let a = store.insert_front("a").unwrap();
        store.insert_front("b").unwrap();
        store.delete_task(a.id).unwrap();
        store.insert_front("c").unwrap();

        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["c", "b"]);
        assert_eq!(ranks(&tasks), vec![1, 2]);
    }

    #[test]
    fn test_ids_never_reused() {
        let (_dir, store) = create_test_store();
        let a = store.insert_front("a").unwrap();
        store.delete_task(a.id).unwrap();
        let b = store.insert_front("b").unwrap();
        assert!(b.id > a.id);

        store.clear_all().unwrap();
        let c = store.insert_front("c").unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn test_rename_task() {
        let (_dir, store) = create_test_store();
        let a = store.insert_front("a").unwrap();
        store.insert_front("b").unwrap();
        store.toggle_completed(a.id).unwrap();

        assert!(store.rename_task(a.id, "renamed").unwrap());

        let renamed = store.get_task(a.id).unwrap().unwrap();
        assert_eq!(renamed.value, "renamed");
        assert_eq!(renamed.sort_order, 2);
        assert!(renamed.completed);
    }

    #[test]
    fn test_rename_nonexistent_task() {
        let (_dir, store) = create_test_store();
        assert!(!store.rename_task(5, "nothing").unwrap());
    }

    #[test]
    fn test_toggle_completed_flips_stored_value() {
        let (_dir, store) = create_test_store();
        let task = store.insert_front("a").unwrap();

        assert_eq!(store.toggle_completed(task.id).unwrap(), Some(true));
        assert!(store.get_task(task.id).unwrap().unwrap().completed);

        assert_eq!(store.toggle_completed(task.id).unwrap(), Some(false));
        assert!(!store.get_task(task.id).unwrap().unwrap().completed);
    }

    #[test]
    fn test_toggle_completed_does_not_move_task() {
        let (_dir, store) = create_test_store();
        let a = store.insert_front("a").unwrap();
        store.insert_front("b").unwrap();

        store.toggle_completed(a.id).unwrap();
        let tasks = store.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_nonexistent_task() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.toggle_completed(3).unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, store) = create_test_store();
        store.insert_front("a").unwrap();
        store.insert_front("b").unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.list_ordered().unwrap().is_empty());
    }

    #[test]
    fn test_clear_all_empty() {
        let (_dir, store) = create_test_store();
        assert_eq!(store.clear_all().unwrap(), 0);
    }

    #[test]
    fn test_store_reopens_existing_database() {
        let (dir, store) = create_test_store();
        store.insert_front("persisted").unwrap();

        let reopened = SqliteTaskStore::new(dir.path().join("tasks.db")).unwrap();
        let tasks = reopened.list_ordered().unwrap();
        assert_eq!(values(&tasks), vec!["persisted"]);
    }

    #[test]
    fn test_new_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("tasks.db");
        let store = SqliteTaskStore::new(&path).unwrap();
        assert_eq!(store.db_path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_new_fails_on_corrupt_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.db");
        std::fs::write(&path, "this is not a valid sqlite database").unwrap();

        assert!(SqliteTaskStore::new(&path).is_err());
    }

    #[test]
    fn test_open_lenient_on_corrupt_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.db");
        std::fs::write(&path, "this is not a valid sqlite database").unwrap();

        let store = SqliteTaskStore::open_lenient(&path);
        assert!(store.list_ordered().is_err());
        assert!(store.insert_front("a").is_err());
    }

    #[test]
    fn test_open_lenient_on_healthy_database() {
        let dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::open_lenient(dir.path().join("tasks.db"));
        store.insert_front("a").unwrap();
        assert_eq!(store.list_ordered().unwrap().len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_list_is_reverse_insertion_order(
            inputs in proptest::collection::hash_set("[a-z]{1,8}", 1..12)
        ) {
            let (_dir, store) = create_test_store();
            let inputs: Vec<String> = inputs.into_iter().collect();
            for value in &inputs {
                store.insert_front(value).unwrap();
            }

            let tasks = store.list_ordered().unwrap();
            let listed: Vec<String> = tasks.iter().map(|t| t.value.clone()).collect();
            let expected: Vec<String> = inputs.iter().rev().cloned().collect();
            prop_assert_eq!(listed, expected);

            let expected_ranks: Vec<i64> = (1..=tasks.len() as i64).collect();
            prop_assert_eq!(ranks(&tasks), expected_ranks);
        }
    }
}
