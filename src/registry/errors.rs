//! Registry error types
//!
//! Registry errors surface at build time, once per record type. They mean a
//! field declaration does not match the record it describes and the process
//! should not start serving requests against it.
//!
//! Error codes:
//! - UIFILTER_UNKNOWN_ATTRIBUTE
//! - UIFILTER_DATA_TYPE_MISMATCH
//! - UIFILTER_DUPLICATE_FIELD

use thiserror::Error;

use super::types::DataType;

/// Result type for registry construction
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Declaration names an attribute the record type does not have
    #[error("Field '{field}' maps to unknown attribute '{attribute}' on {record}")]
    UnknownAttribute {
        record: &'static str,
        field: String,
        attribute: String,
    },

    /// Declared data type disagrees with the attribute's data type
    #[error(
        "Field '{field}' is declared {declared} but attribute '{attribute}' on {record} is {actual}"
    )]
    DataTypeMismatch {
        record: &'static str,
        field: String,
        attribute: String,
        declared: DataType,
        actual: DataType,
    },

    /// Same logical name declared twice
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),
}

impl RegistryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::UnknownAttribute { .. } => "UIFILTER_UNKNOWN_ATTRIBUTE",
            RegistryError::DataTypeMismatch { .. } => "UIFILTER_DATA_TYPE_MISMATCH",
            RegistryError::DuplicateField(_) => "UIFILTER_DUPLICATE_FIELD",
        }
    }
}
