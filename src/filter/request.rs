//! Filter request wire model
//!
//! The declarative query a table widget sends: which rows, in which order,
//! matching which per-field clauses. Field names are logical names resolved
//! through a registry; `global` fans out to every global field.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::match_mode::MatchMode;

/// Reserved filter key that searches every global field
pub const GLOBAL_KEY: &str = "global";

/// Declarative filter, sort, and page request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Index of the first row to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,

    /// Page size; absent or 0 returns every match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,

    /// Index one past the last row; see [`FilterRequest::fill_rows_from_last`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,

    /// Sort keys in precedence order
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_fields: Vec<SortField>,

    /// Clause groups keyed by logical field name or `global`
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: BTreeMap<String, Vec<FilterClause>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page window
    pub fn with_page(mut self, first: u32, rows: u32) -> Self {
        self.first = Some(first);
        self.rows = Some(rows);
        self
    }

    /// Appends a sort key
    pub fn with_sort(mut self, field: impl Into<String>, order: i32) -> Self {
        self.sort_fields.push(SortField::new(field, order));
        self
    }

    /// Appends a clause to the group for `key`
    pub fn with_clause(mut self, key: impl Into<String>, clause: FilterClause) -> Self {
        self.filters.entry(key.into()).or_default().push(clause);
        self
    }

    /// Fills a missing `rows` from `last`, as a table widget does before
    /// sending its request.
    ///
    /// A non-zero `rows` is kept. Otherwise, when `first` and `last` are both
    /// non-zero, `rows = last - first` (0 if `last` is not past `first`), else
    /// `rows = last` for a non-zero `last`. Compilation only ever reads `rows`;
    /// `last` on its own never paginates.
    pub fn fill_rows_from_last(mut self) -> Self {
        if self.rows.map_or(false, |rows| rows > 0) {
            return self;
        }

        let first = self.first.filter(|&first| first > 0);
        let last = self.last.filter(|&last| last > 0);
        match (first, last) {
            (Some(first), Some(last)) => self.rows = Some(last.saturating_sub(first)),
            (None, Some(last)) => self.rows = Some(last),
            _ => {}
        }
        self
    }
}

/// One sort key. `order > 0` is ascending, anything else descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: i32,
}

impl SortField {
    pub fn new(field: impl Into<String>, order: i32) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// How clauses under one key combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    And,
    Or,
}

/// One filter clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// Untyped value, coerced to the field's data type at compile time
    #[serde(default)]
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
}

impl FilterClause {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            match_mode: None,
            operator: None,
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    pub fn with_operator(mut self, operator: FilterOperator) -> Self {
        self.operator = Some(operator);
        self
    }
}
