//! CLI error types
//!
//! Every CLI error ends the process with a non-zero exit.

use std::convert::Infallible;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::filter::FilterError;
use crate::logging::LoggingError;
use crate::query::QueryError;
use crate::registry::RegistryError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Query(#[from] QueryError<Infallible>),

    #[error("Failed to load dataset '{path}': {reason}")]
    Dataset { path: PathBuf, reason: String },

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn request(msg: impl Into<String>) -> Self {
        CliError::Request(msg.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(err) => err.code(),
            CliError::Logging(_) => "UIFILTER_CLI_LOGGING",
            CliError::Registry(err) => err.code(),
            CliError::Filter(err) => err.code(),
            CliError::Query(err) => err.code(),
            CliError::Dataset { .. } => "UIFILTER_CLI_DATASET",
            CliError::Request(_) => "UIFILTER_CLI_REQUEST",
            CliError::Io(_) => "UIFILTER_CLI_IO",
            CliError::Json(_) => "UIFILTER_CLI_JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_keeps_code() {
        let err: CliError = QueryError::<Infallible>::from(FilterError::PageTooLarge {
            requested: 2000,
            max: 1000,
        })
        .into();

        assert_eq!(err.code(), "UIFILTER_PAGE_TOO_LARGE");
        assert_eq!(err.to_string(), "Page size 2000 exceeds maximum 1000");
    }

    #[test]
    fn test_request_error() {
        let err = CliError::request("Empty input");
        assert_eq!(err.code(), "UIFILTER_CLI_REQUEST");
        assert_eq!(err.to_string(), "Invalid request: Empty input");
    }
}
