//! Record store capability
//!
//! The filter compiler does not store anything. It hands a predicate, an
//! ordering, and an optional page to whatever implements `RecordStore`, and
//! propagates that store's errors unchanged.
//!
//! `MemoryStore` is the in-process implementation used by the CLI and tests.

mod memory;

pub use memory::MemoryStore;

use crate::filter::{PageSpec, Predicate, SortOrder};

/// Storage that can evaluate compiled filters
pub trait RecordStore {
    /// Record type held by this store
    type Record;

    /// Store failure, passed through to callers untouched
    type Error: std::error::Error + 'static;

    /// Counts records matching the predicate; `None` counts everything
    fn count(&self, predicate: Option<&Predicate>) -> Result<u64, Self::Error>;

    /// Every matching record, ordered
    fn find_all(
        &self,
        predicate: Option<&Predicate>,
        order: &SortOrder,
    ) -> Result<Vec<Self::Record>, Self::Error>;

    /// One page of matching records, ordered
    fn find_page(
        &self,
        predicate: Option<&Predicate>,
        order: &SortOrder,
        page: PageSpec,
    ) -> Result<Vec<Self::Record>, Self::Error>;
}
