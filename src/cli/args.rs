//! CLI argument definitions using clap
//!
//! Commands:
//! - uifilter query   [--config <path>] [--request <file>]
//! - uifilter count   [--config <path>] [--request <file>]
//! - uifilter explain [--config <path>] [--request <file>]
//! - uifilter search  [--config <path>] --name <text>
//! - uifilter top     [--config <path>] [--count <n>]
//! - uifilter fields
//!
//! Without `--request`, the request JSON is read from stdin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// uifilter - filter, sort, and paginate records from table-widget requests
#[derive(Parser, Debug)]
#[command(name = "uifilter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a filter request and print the matching page with its total
    Query {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Request JSON file (stdin when omitted)
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Count the records a filter request matches
    Count {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Request JSON file (stdin when omitted)
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Show what a filter request compiles to without running it
    Explain {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Request JSON file (stdin when omitted)
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Find heroes whose name contains the given text
    Search {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Text to look for, case-insensitive
        #[arg(long)]
        name: String,
    },

    /// List the highest-rated heroes
    Top {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of heroes to list
        #[arg(long, default_value_t = 5)]
        count: u32,
    },

    /// List the filterable hero fields
    Fields,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_top_default_count() {
        let cli = Cli::try_parse_from(["uifilter", "top"]).unwrap();
        assert!(matches!(cli.command, Command::Top { config: None, count: 5 }));
    }

    #[test]
    fn test_search_requires_name() {
        assert!(Cli::try_parse_from(["uifilter", "search"]).is_err());
    }

    #[test]
    fn test_query_with_request_file() {
        let cli = Cli::try_parse_from([
            "uifilter",
            "query",
            "--config",
            "uifilter.json",
            "--request",
            "req.json",
        ])
        .unwrap();

        match cli.command {
            Command::Query { config, request } => {
                assert_eq!(config, Some(PathBuf::from("uifilter.json")));
                assert_eq!(request, Some(PathBuf::from("req.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
