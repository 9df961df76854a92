//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::{run_shell, Command, EMPTY_INPUT_PROMPT};
use crate::error::Error;
use crate::tasks::{AsyncTaskStore, SqliteTaskStore, TaskId};
use crate::view::TaskListView;
use log::info;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tokio::io::BufReader;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command against the database at `db_path`.
pub async fn run(command: Command, db_path: &Path) -> CliOutput {
    info!("Running {command:?} against {}", db_path.display());

    // The shell stays usable even when the database is broken; failures then
    // show up per command instead.
    let store = if command == Command::Shell {
        SqliteTaskStore::open_lenient(db_path)
    } else {
        match SqliteTaskStore::new(db_path) {
            Ok(s) => s,
            Err(e) => return error_output(format!("Error opening task database: {e}")),
        }
    };
    let mut view = TaskListView::new(AsyncTaskStore::new(store));

    match command {
        Command::Add { text } => add(&mut view, &text.join(" ")).await,
        Command::List { json } => list(&mut view, json).await,
        Command::Rename { position, text } => rename(&mut view, position, &text.join(" ")).await,
        Command::Toggle { position } => toggle(&mut view, position).await,
        Command::Delete { position } => delete(&mut view, position).await,
        Command::Clear => clear(&mut view).await,
        Command::Shell => shell(&mut view).await,
    }
}

// === Task Commands ===

async fn add(view: &mut TaskListView, text: &str) -> CliOutput {
    match view.add(text).await {
        Ok(_) => success_output(view.render()),
        Err(Error::EmptyValue) => error_output(EMPTY_INPUT_PROMPT.to_string()),
        Err(e) => error_output(format!("Error adding task: {e}")),
    }
}

async fn list(view: &mut TaskListView, json: bool) -> CliOutput {
    if let Err(e) = view.refresh().await {
        return error_output(format!("Error reading tasks: {e}"));
    }
    if json {
        json_output(&view.tasks())
    } else {
        success_output(view.render())
    }
}

async fn rename(view: &mut TaskListView, position: usize, text: &str) -> CliOutput {
    let id = match locate(view, position).await {
        Ok(id) => id,
        Err(output) => return output,
    };
    match view.rename(id, text).await {
        Ok(true) => success_output(view.render()),
        Ok(false) => not_found(position),
        Err(Error::EmptyValue) => error_output(EMPTY_INPUT_PROMPT.to_string()),
        Err(e) => error_output(format!("Error renaming task: {e}")),
    }
}

async fn toggle(view: &mut TaskListView, position: usize) -> CliOutput {
    let id = match locate(view, position).await {
        Ok(id) => id,
        Err(output) => return output,
    };
    match view.toggle(id).await {
        Ok(Some(_)) => success_output(view.render()),
        Ok(None) => not_found(position),
        Err(e) => error_output(format!("Error updating task: {e}")),
    }
}

async fn delete(view: &mut TaskListView, position: usize) -> CliOutput {
    let id = match locate(view, position).await {
        Ok(id) => id,
        Err(output) => return output,
    };
    match view.remove(id).await {
        Ok(true) => success_output(view.render()),
        Ok(false) => not_found(position),
        Err(e) => error_output(format!("Error deleting task: {e}")),
    }
}

/// Read the list and find the id of the task numbered `position` in it.
async fn locate(view: &mut TaskListView, position: usize) -> Result<TaskId, CliOutput> {
    if let Err(e) = view.refresh().await {
        return Err(error_output(format!("Error reading tasks: {e}")));
    }
    view.task_at(position).map(|task| task.id).ok_or_else(|| not_found(position))
}

async fn clear(view: &mut TaskListView) -> CliOutput {
    match view.clear().await {
        Ok(count) => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: vec![view.render()],
            stderr: vec![format!("Removed {count} task(s)")],
        },
        Err(e) => error_output(format!("Error clearing tasks: {e}")),
    }
}

// === Shell ===

async fn shell(view: &mut TaskListView) -> CliOutput {
    // A failed first read is logged and shown as an empty list.
    let _ = view.refresh().await;

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    match run_shell(view, input, &mut out).await {
        Ok(()) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: vec![] },
        Err(e) => error_output(format!("Error running shell: {e}")),
    }
}

// === Output Helpers ===

fn not_found(position: usize) -> CliOutput {
    error_output(format!("No task at position {position}"))
}

fn to_json<T: Serialize>(value: &T) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match to_json(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(format!("Error encoding tasks: {e}")),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
