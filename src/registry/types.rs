//! Registry type definitions
//!
//! Data types recognised by the filter compiler:
//! - text: compared case-insensitively as strings
//! - numeric: integers and floating point, compared numerically
//! - date: instants, compared chronologically

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Character data
    Text,
    /// Integer or floating point
    Numeric,
    /// Point in time
    Date,
}

impl DataType {
    /// Returns the type name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Numeric => "numeric",
            DataType::Date => "date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved description of one logical field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Physical attribute on the record
    pub attribute_name: String,
    /// Data type driving match-mode defaults and value coercion
    pub data_type: DataType,
    /// Whether the field takes part in `global` search
    pub global: bool,
}

impl FieldDescriptor {
    pub fn new(attribute_name: impl Into<String>, data_type: DataType, global: bool) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            data_type,
            global,
        }
    }
}

/// One `(logicalName, attributeName, dataType, global)` declaration.
///
/// Deserializable so a registry can be supplied from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDeclaration {
    /// Client-facing field name
    pub logical_name: String,
    /// Physical attribute on the record
    pub attribute_name: String,
    /// Declared data type
    pub data_type: DataType,
    /// Participates in global search
    #[serde(default)]
    pub global: bool,
}

impl FieldDeclaration {
    pub fn new(
        logical_name: impl Into<String>,
        attribute_name: impl Into<String>,
        data_type: DataType,
        global: bool,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            attribute_name: attribute_name.into(),
            data_type,
            global,
        }
    }
}
