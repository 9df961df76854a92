//! Ordered task storage.
//!
//! This module provides:
//! - The `tasks` table schema and its initializer
//! - A `SQLite` store that keeps tasks in rank order, newest first
//! - An async wrapper that runs store operations one at a time
//!
//! # Example
//!
//! ```no_run
//! use todolist::tasks::{SqliteTaskStore, TaskStore};
//!
//! let store = SqliteTaskStore::new("/tmp/tasks.db").unwrap();
//!
//! let milk = store.insert_front("Buy milk").unwrap();
//! store.insert_front("Walk dog").unwrap();
//! store.toggle_completed(milk.id).unwrap();
//!
//! // Newest first: "Walk dog", then "Buy milk".
//! let tasks = store.list_ordered().unwrap();
//! ```

pub mod async_store;
pub mod models;
pub mod schema;
pub mod store;

pub use async_store::AsyncTaskStore;
pub use models::{validate_value, Task, TaskId};
pub use store::{SqliteTaskStore, TaskStore};
