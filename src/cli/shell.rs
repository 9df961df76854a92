//! Interactive shell over a [`TaskListView`].
//!
//! Tasks are addressed by their 1-based position in the displayed list. The
//! position is resolved to a task id through the view's snapshot, so it
//! always refers to what was last shown.

use crate::cli::EMPTY_INPUT_PROMPT;
use crate::error::{Error, Result};
use crate::tasks::{TaskId, TaskStore};
use crate::view::TaskListView;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Shell prompt.
const PROMPT: &str = "> ";

/// Shell usage text.
const HELP: &str = "\
Commands:
  add <text>       Add a task at the top
  done <n>         Toggle task n between done and not done
  edit <n> <text>  Replace the text of task n
  del <n>          Delete task n
  clear            Delete every task
  list             Show the list again
  help             Show this help
  quit             Leave the shell";

/// A parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Add a task with the given text.
    Add(String),
    /// Toggle completion of the task at a position.
    Done(usize),
    /// Replace the text of the task at a position.
    Edit(usize, String),
    /// Delete the task at a position.
    Delete(usize),
    /// Delete every task.
    Clear,
    /// Show the list.
    List,
    /// Show usage.
    Help,
    /// Leave the shell.
    Quit,
    /// A blank line.
    Empty,
    /// Unparseable input, with a message for the user.
    Invalid(String),
}

/// Parse one line of shell input.
#[must_use]
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "" => ShellCommand::Empty,
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "done" | "toggle" => {
            parse_position(rest).map_or_else(ShellCommand::Invalid, ShellCommand::Done)
        }
        "del" | "delete" | "rm" => {
            parse_position(rest).map_or_else(ShellCommand::Invalid, ShellCommand::Delete)
        }
        "edit" | "rename" => {
            let (position, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match parse_position(position) {
                Ok(position) => ShellCommand::Edit(position, text.trim().to_string()),
                Err(message) => ShellCommand::Invalid(message),
            }
        }
        "clear" => ShellCommand::Clear,
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => ShellCommand::Invalid(format!("Unknown command: {other} (try 'help')")),
    }
}

fn parse_position(text: &str) -> std::result::Result<usize, String> {
    match text.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ if text.is_empty() => Err("Missing task number".to_string()),
        _ => Err(format!("Not a task number: {text}")),
    }
}

/// Run the shell until `quit` or end of input.
///
/// The list is shown on start and after every command that changes it.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run_shell<S, R, W>(
    view: &mut TaskListView<S>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    S: TaskStore + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", view.render())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            command => {
                let message = execute(view, command).await;
                writeln!(out, "{message}")?;
            }
        }
    }

    Ok(())
}

/// Execute a command, returning what to show the user.
async fn execute<S>(view: &mut TaskListView<S>, command: ShellCommand) -> String
where
    S: TaskStore + Send + Sync + 'static,
{
    match command {
        ShellCommand::Add(text) => {
            let outcome = view.add(&text).await;
            show(view, view_result(outcome, "add"))
        }
        ShellCommand::Done(position) => match resolve(view, position) {
            Ok(id) => {
                let outcome = view.toggle(id).await.map(|state| state.is_some());
                show(view, found_result(outcome, "update"))
            }
            Err(message) => message,
        },
        ShellCommand::Edit(position, text) => match resolve(view, position) {
            Ok(id) => {
                let outcome = view.rename(id, &text).await;
                show(view, found_result(outcome, "edit"))
            }
            Err(message) => message,
        },
        ShellCommand::Delete(position) => match resolve(view, position) {
            Ok(id) => {
                let outcome = view.remove(id).await;
                show(view, found_result(outcome, "delete"))
            }
            Err(message) => message,
        },
        ShellCommand::Clear => {
            let outcome = view.clear().await;
            show(view, view_result(outcome, "clear"))
        }
        ShellCommand::List => {
            let _ = view.refresh().await;
            view.render()
        }
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Invalid(message) => message,
        // Handled by the read loop.
        ShellCommand::Empty | ShellCommand::Quit => String::new(),
    }
}

/// Map a task position from the current snapshot to its id.
fn resolve<S>(view: &TaskListView<S>, position: usize) -> std::result::Result<TaskId, String>
where
    S: TaskStore + Send + Sync + 'static,
{
    view.task_at(position)
        .map(|task| task.id)
        .ok_or_else(|| format!("No task at position {position}"))
}

/// Render the list on success, or the failure message.
fn show<S>(view: &TaskListView<S>, outcome: std::result::Result<(), String>) -> String
where
    S: TaskStore + Send + Sync + 'static,
{
    match outcome {
        Ok(()) => view.render(),
        Err(message) => message,
    }
}

fn view_result<T>(outcome: Result<T>, operation: &str) -> std::result::Result<(), String> {
    match outcome {
        Ok(_) => Ok(()),
        Err(Error::EmptyValue) => Err(EMPTY_INPUT_PROMPT.to_string()),
        Err(e) => Err(format!("Could not {operation} task: {e}")),
    }
}

/// Like [`view_result`], treating a vanished task as a message of its own.
fn found_result(outcome: Result<bool>, operation: &str) -> std::result::Result<(), String> {
    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => Err("That task no longer exists".to_string()),
        Err(e) => view_result::<()>(Err(e), operation),
    }
}
