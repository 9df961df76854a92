//! # `todolist`
//!
//! A local, single-user task list kept in rank order in an embedded `SQLite`
//! database. New tasks go to the top; a live view is re-read from the
//! database after every change.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod tasks;
pub mod view;

pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
