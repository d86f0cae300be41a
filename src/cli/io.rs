//! JSON I/O handling for the CLI
//!
//! - Input: one JSON request, from a file or stdin
//! - Output: pretty JSON on stdout
//! - Logs go to stderr

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;

use super::errors::{CliError, CliResult};
use crate::filter::FilterRequest;
use crate::heroes::Hero;

/// Reads a filter request from `path`, or stdin when `None`
pub fn read_request(path: Option<&Path>) -> CliResult<FilterRequest> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_request(&content)
}

/// Parses request JSON; blank input is an error
pub fn parse_request(content: &str) -> CliResult<FilterRequest> {
    if content.trim().is_empty() {
        return Err(CliError::request("Empty input"));
    }

    serde_json::from_str(content).map_err(|e| CliError::request(e.to_string()))
}

/// Loads a hero dataset: a JSON array of heroes
pub fn load_dataset(path: &Path) -> CliResult<Vec<Hero>> {
    let dataset_error = |reason: String| CliError::Dataset {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| dataset_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| dataset_error(e.to_string()))
}

/// Writes a value as pretty JSON to stdout
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
