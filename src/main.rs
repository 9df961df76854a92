//! CLI binary for `todolist`.
//!
//! This binary is a thin wrapper that loads configuration, sets up logging
//! and delegates to the library.

use clap::Parser;
use std::process::ExitCode;
use todolist::cli::{load_config, resolve_db_path, run, Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config: {e}");
            todolist::config::Config::default()
        }
    };

    if let Err(e) = todolist::logging::init(&config) {
        eprintln!("Warning: Logging disabled: {e}");
    }

    let db_path = match resolve_db_path(cli.db, &config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let output = run(cli.command.unwrap_or(Command::Shell), &db_path).await;

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
