//! Match modes and their resolution
//!
//! A clause may omit its match mode; the field's data type then picks one.
//! Which modes a data type accepts is decided here, in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::predicate::{CompareOp, TextOp};
use crate::registry::DataType;

/// Comparison requested for one field/value pair.
///
/// Date-flavoured aliases sent by table widgets (`dateIs`, `before`, ...)
/// deserialize to the equivalent generic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    StartsWith,
    Contains,
    NotContains,
    EndsWith,
    #[serde(alias = "is", alias = "dateIs")]
    Equals,
    #[serde(alias = "isNot", alias = "dateIsNot")]
    NotEquals,
    #[serde(alias = "after", alias = "dateAfter")]
    Gt,
    Gte,
    #[serde(alias = "before", alias = "dateBefore")]
    Lt,
    Lte,
    /// Accepted on the wire, never compiled
    In,
    /// Accepted on the wire, never compiled
    Between,
}

impl MatchMode {
    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::StartsWith => "startsWith",
            MatchMode::Contains => "contains",
            MatchMode::NotContains => "notContains",
            MatchMode::EndsWith => "endsWith",
            MatchMode::Equals => "equals",
            MatchMode::NotEquals => "notEquals",
            MatchMode::Gt => "gt",
            MatchMode::Gte => "gte",
            MatchMode::Lt => "lt",
            MatchMode::Lte => "lte",
            MatchMode::In => "in",
            MatchMode::Between => "between",
        }
    }

    /// Effective mode for a clause: the explicit mode if given, otherwise the
    /// data type's default (`contains` for text, `equals` otherwise).
    pub fn resolve(data_type: DataType, explicit: Option<MatchMode>) -> MatchMode {
        explicit.unwrap_or(match data_type {
            DataType::Text => MatchMode::Contains,
            DataType::Numeric | DataType::Date => MatchMode::Equals,
        })
    }

    /// String test for this mode, if it is a text mode
    pub fn text_op(self) -> Option<TextOp> {
        match self {
            MatchMode::Contains => Some(TextOp::Contains),
            MatchMode::NotContains => Some(TextOp::NotContains),
            MatchMode::StartsWith => Some(TextOp::StartsWith),
            MatchMode::EndsWith => Some(TextOp::EndsWith),
            MatchMode::Equals => Some(TextOp::Equals),
            MatchMode::NotEquals => Some(TextOp::NotEquals),
            _ => None,
        }
    }

    /// Ordered comparison for this mode, if it is one
    pub fn compare_op(self) -> Option<CompareOp> {
        match self {
            MatchMode::Equals => Some(CompareOp::Eq),
            MatchMode::NotEquals => Some(CompareOp::Ne),
            MatchMode::Gt => Some(CompareOp::Gt),
            MatchMode::Gte => Some(CompareOp::Gte),
            MatchMode::Lt => Some(CompareOp::Lt),
            MatchMode::Lte => Some(CompareOp::Lte),
            _ => None,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
