//! Query error types
//!
//! A query fails either because the request does not compile or because the
//! store failed. Store errors are wrapped, never reinterpreted.

use thiserror::Error;

use crate::filter::FilterError;

/// Result type for facade operations over a store with error `E`
pub type QueryResult<T, E> = Result<T, QueryError<E>>;

/// Facade errors
#[derive(Debug, Error)]
pub enum QueryError<E> {
    /// Request rejected at compile time
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Record store failure
    #[error("Record store failed: {0}")]
    Store(#[source] E),
}

impl<E> QueryError<E> {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Filter(err) => err.code(),
            QueryError::Store(_) => "UIFILTER_STORE_FAILED",
        }
    }

    /// Whether the caller sent a bad request (as opposed to a store fault)
    pub fn is_rejected_request(&self) -> bool {
        matches!(self, QueryError::Filter(_))
    }
}
