//! Query result structures

use serde::Serialize;

/// One page of matches plus the total number of matches
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult<R> {
    /// Records on the requested page, ordered
    pub records: Vec<R>,
    /// Matching records ignoring pagination
    pub total_records: u64,
}

impl<R> FilterResult<R> {
    pub fn new(records: Vec<R>, total_records: u64) -> Self {
        Self {
            records,
            total_records,
        }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
