//! Filter compilation errors
//!
//! Every error here rejects the request. Unknown fields are not errors; they
//! are skipped during compilation.
//!
//! Error codes:
//! - UIFILTER_UNSUPPORTED_MATCH_MODE
//! - UIFILTER_MALFORMED_VALUE
//! - UIFILTER_PAGE_TOO_LARGE

use thiserror::Error;

use super::match_mode::MatchMode;
use crate::registry::DataType;

/// Result type for filter compilation
pub type CompileResult<T> = Result<T, FilterError>;

/// Errors raised while compiling a filter request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The match mode has no meaning for the field's data type
    #[error("Unsupported match mode '{mode}' for {data_type} field '{field}'")]
    UnsupportedMatchMode {
        field: String,
        mode: MatchMode,
        data_type: DataType,
    },

    /// The clause value cannot be coerced to the field's data type
    #[error("Malformed value for field '{field}': {reason}")]
    MalformedValue { field: String, reason: String },

    /// Requested page size exceeds the configured maximum
    #[error("Page size {requested} exceeds maximum {max}")]
    PageTooLarge { requested: u32, max: u32 },
}

impl FilterError {
    pub(crate) fn unsupported(field: &str, mode: MatchMode, data_type: DataType) -> Self {
        FilterError::UnsupportedMatchMode {
            field: field.to_string(),
            mode,
            data_type,
        }
    }

    pub(crate) fn malformed(field: &str, reason: impl Into<String>) -> Self {
        FilterError::MalformedValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::UnsupportedMatchMode { .. } => "UIFILTER_UNSUPPORTED_MATCH_MODE",
            FilterError::MalformedValue { .. } => "UIFILTER_MALFORMED_VALUE",
            FilterError::PageTooLarge { .. } => "UIFILTER_PAGE_TOO_LARGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FilterError::unsupported("name", MatchMode::In, DataType::Text).code(),
            "UIFILTER_UNSUPPORTED_MATCH_MODE"
        );
        assert_eq!(
            FilterError::malformed("rating", "expected a number").code(),
            "UIFILTER_MALFORMED_VALUE"
        );
        assert_eq!(
            FilterError::PageTooLarge {
                requested: 5000,
                max: 1000
            }
            .code(),
            "UIFILTER_PAGE_TOO_LARGE"
        );
    }

    #[test]
    fn test_unsupported_display() {
        let err = FilterError::unsupported("rating", MatchMode::Between, DataType::Numeric);
        let display = err.to_string();
        assert!(display.contains("between"));
        assert!(display.contains("numeric"));
        assert!(display.contains("rating"));
    }
}
