//! In-memory view of the task list.
//!
//! [`TaskListView`] holds the last list read from the store. The snapshot is
//! never edited in place: every successful mutation is followed by a full
//! re-read that replaces it. When an operation fails the error is logged and
//! returned, and the snapshot is left as it was.

use crate::error::Result;
use crate::tasks::{validate_value, AsyncTaskStore, SqliteTaskStore, Task, TaskId, TaskStore};
use log::warn;
use std::fmt::Write;

/// Text shown when the list is empty.
pub const EMPTY_LIST_MESSAGE: &str = "You currently don't have any todo";

/// Read-only snapshot of the ordered task list, kept in sync with a store.
#[derive(Debug)]
pub struct TaskListView<S = SqliteTaskStore> {
    store: AsyncTaskStore<S>,
    tasks: Vec<Task>,
}

impl<S> TaskListView<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    /// Create a view with an empty snapshot. Call [`Self::refresh`] to fill it.
    #[must_use]
    pub const fn new(store: AsyncTaskStore<S>) -> Self {
        Self { store, tasks: Vec::new() }
    }

    /// Create a view and read the current list.
    ///
    /// A failed read is logged and leaves the snapshot empty.
    pub async fn load(store: AsyncTaskStore<S>) -> Self {
        let mut view = Self::new(store);
        // refresh() logs its own failure
        let _ = view.refresh().await;
        view
    }

    /// The current snapshot, lowest rank first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task shown at a 1-based position.
    #[must_use]
    pub fn task_at(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|index| self.tasks.get(index))
    }

    /// Replace the snapshot with a fresh read from the store.
    ///
    /// # Errors
    ///
    /// Returns the read error; the snapshot is then unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.store.list_ordered().await {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to read task list: {e}");
                Err(e)
            }
        }
    }

    /// Add a task at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyValue`] for blank text without touching the
    /// store, or the store error.
    pub async fn add(&mut self, value: &str) -> Result<Task> {
        let value = validate_value(value)?;
        let outcome = self.store.insert_front(value).await;
        self.settle("add", outcome).await
    }

    /// Delete a task. Returns false if it no longer existed.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub async fn remove(&mut self, id: TaskId) -> Result<bool> {
        let outcome = self.store.delete_task(id).await;
        self.settle("delete", outcome).await
    }

    /// Replace a task's text. Returns false if it no longer existed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyValue`] for blank text without touching the
    /// store, or the store error.
    pub async fn rename(&mut self, id: TaskId, value: &str) -> Result<bool> {
        let value = validate_value(value)?;
        let outcome = self.store.rename_task(id, value).await;
        self.settle("rename", outcome).await
    }

    /// Flip a task's completion flag. Returns the new state, or None if the
    /// task no longer existed.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub async fn toggle(&mut self, id: TaskId) -> Result<Option<bool>> {
        let outcome = self.store.toggle_completed(id).await;
        self.settle("toggle", outcome).await
    }

    /// Delete every task. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub async fn clear(&mut self) -> Result<usize> {
        let outcome = self.store.clear_all().await;
        self.settle("clear", outcome).await
    }

    /// Re-read after a successful mutation; log a failed one.
    async fn settle<T>(&mut self, operation: &str, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                // A failed re-read is logged by refresh() and leaves the
                // snapshot stale; the mutation itself still succeeded.
                let _ = self.refresh().await;
                Ok(value)
            }
            Err(e) => {
                warn!("Task {operation} failed: {e}");
                Err(e)
            }
        }
    }

    /// Render the snapshot as numbered lines.
    #[must_use]
    pub fn render(&self) -> String {
        if self.tasks.is_empty() {
            return EMPTY_LIST_MESSAGE.to_string();
        }

        let mut out = String::new();
        for (index, task) in self.tasks.iter().enumerate() {
            let mark = if task.completed { 'x' } else { ' ' };
            if index > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{:>3}. [{mark}] {}", index + 1, task.value);
        }
        out
    }
}
