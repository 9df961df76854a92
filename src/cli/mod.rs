//! Command-line interface for todolist.
//!
//! One-shot subcommands run a single store operation and print the refreshed
//! list. Tasks are addressed by their position in that list, the same way the
//! shell addresses them. Without a subcommand an interactive shell is started.

mod run;
mod shell;


pub use run::{run, CliOutput};
pub use shell::{parse_line, run_shell, ShellCommand};

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Shown when the user submits a task without any text.
pub const EMPTY_INPUT_PROMPT: &str = "Please enter a task first";

/// A local task list, newest task first.
///
/// Run without a command to start the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "todolist")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the task database (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path of the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task at the top of the list.
    Add {
        /// Task text (words are joined with spaces)
        text: Vec<String>,
    },

    /// Show the list, newest first.
    List {
        /// Print the tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a task's text.
    Rename {
        /// Position in the list, as numbered by `list`
        position: usize,

        /// New text (words are joined with spaces)
        text: Vec<String>,
    },

    /// Flip a task between done and not done.
    Toggle {
        /// Position in the list, as numbered by `list`
        position: usize,
    },

    /// Delete a task.
    Delete {
        /// Position in the list, as numbered by `list`
        position: usize,
    },

    /// Delete every task.
    Clear,

    /// Start the interactive shell (the default).
    Shell,
}

/// Load the config file named on the command line, or the default one.
///
/// A missing file yields the default config.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

/// Pick the database path: the `--db` flag, else the config.
///
/// # Errors
///
/// Returns an error if no path is given and no default location exists.
pub fn resolve_db_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.map_or_else(|| config.database_path(), Ok)
}
