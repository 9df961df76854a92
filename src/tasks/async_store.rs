//! Async front for a [`TaskStore`].
//!
//! Store operations are blocking `SQLite` calls. [`AsyncTaskStore`] runs each
//! one on tokio's blocking pool and lets the caller await it. A single-permit
//! semaphore keeps at most one operation in flight, so operations apply in the
//! order they were issued.

use crate::error::{Error, Result};
use crate::tasks::models::{Task, TaskId};
use crate::tasks::store::{SqliteTaskStore, TaskStore};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Awaitable, serialized access to a task store.
#[derive(Debug)]
pub struct AsyncTaskStore<S = SqliteTaskStore> {
    store: Arc<S>,
    gate: Arc<Semaphore>,
}

impl<S> Clone for AsyncTaskStore<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), gate: Arc::clone(&self.gate) }
    }
}

impl<S> AsyncTaskStore<S>
where
    S: TaskStore + Send + Sync + 'static,
{
    /// Wrap a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store: Arc::new(store), gate: Arc::new(Semaphore::new(1)) }
    }

    /// Get the wrapped store.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Run a blocking store operation and wait for it to finish.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        // The blocking job owns the permit; it outlives a dropped caller.
        let permit = Arc::clone(&self.gate)
            .acquire_owned()
            .await
            .map_err(|e| Error::Background(e.to_string()))?;
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            op(store.as_ref())
        })
        .await
        .map_err(|e| Error::Background(e.to_string()))?
    }

    /// See [`TaskStore::insert_front`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn insert_front(&self, value: &str) -> Result<Task> {
        let value = value.to_string();
        self.run(move |store| store.insert_front(&value)).await
    }

    /// See [`TaskStore::get_task`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.run(move |store| store.get_task(id)).await
    }

    /// See [`TaskStore::delete_task`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn delete_task(&self, id: TaskId) -> Result<bool> {
        self.run(move |store| store.delete_task(id)).await
    }

    /// See [`TaskStore::rename_task`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn rename_task(&self, id: TaskId, value: &str) -> Result<bool> {
        let value = value.to_string();
        self.run(move |store| store.rename_task(id, &value)).await
    }

    /// See [`TaskStore::toggle_completed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn toggle_completed(&self, id: TaskId) -> Result<Option<bool>> {
        self.run(move |store| store.toggle_completed(id)).await
    }

    /// See [`TaskStore::clear_all`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn clear_all(&self) -> Result<usize> {
        self.run(|store| store.clear_all()).await
    }

    /// See [`TaskStore::list_ordered`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    pub async fn list_ordered(&self) -> Result<Vec<Task>> {
        self.run(|store| store.list_ordered()).await
    }
}
