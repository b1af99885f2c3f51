//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, ProjectCommands};

/// Print a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
