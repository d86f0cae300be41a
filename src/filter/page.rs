//! Paginator
//!
//! Pages are addressed by index, not by offset: the page index is
//! `first / rows`. A `first` that is not a multiple of `rows` rounds down to
//! the page containing it rather than opening a window at that row.

use std::fmt;

use serde::Serialize;

/// Page request for a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    /// Zero-based page number
    pub index: u32,
    /// Rows per page, always > 0
    pub size: u32,
}

impl PageSpec {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Row offset of the first record on this page
    pub fn offset(&self) -> usize {
        self.index as usize * self.size as usize
    }

    /// Cuts this page out of an ordered result set
    pub fn slice<T>(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .skip(self.offset())
            .take(self.size as usize)
            .collect()
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} of size {} (offset {})",
            self.index,
            self.size,
            self.offset()
        )
    }
}

/// Page to request, or `None` to return every match
pub fn paginate(rows: Option<u32>, first: Option<u32>) -> Option<PageSpec> {
    let rows = rows.filter(|&rows| rows > 0)?;
    let first = first.unwrap_or(0);
    Some(PageSpec::new(first / rows, rows))
}
