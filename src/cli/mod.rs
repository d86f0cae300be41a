//! CLI module for uifilter
//!
//! Provides command-line access to the hero filter service:
//! - query: run a filter request, print page and total
//! - count: count matches
//! - explain: show the compiled request
//! - search: name search
//! - top: highest-rated heroes
//! - fields: list the registry

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{count, explain, fields, query, run_command, search, top};
pub use errors::{CliError, CliResult};
pub use io::{load_dataset, parse_request, read_request, write_json};

/// Parses arguments and runs the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
