//! In-memory record store
//!
//! Holds records in insertion order behind a read-write lock. Every call
//! takes the lock on its own, so a count followed by a find may observe
//! different contents if a writer slips in between.

use std::convert::Infallible;

use parking_lot::RwLock;

use super::RecordStore;
use crate::filter::{PageSpec, Predicate, SortOrder};
use crate::registry::Record;

/// Vec-backed store
#[derive(Debug, Default)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record + Clone> MemoryStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Appends a record
    pub fn insert(&self, record: R) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn matching(&self, predicate: Option<&Predicate>, order: &SortOrder) -> Vec<R> {
        let mut matched: Vec<R> = self
            .records
            .read()
            .iter()
            .filter(|record| predicate.map_or(true, |p| p.matches(*record)))
            .cloned()
            .collect();
        order.sort(&mut matched);
        matched
    }
}

impl<R: Record + Clone> RecordStore for MemoryStore<R> {
    type Record = R;
    type Error = Infallible;

    fn count(&self, predicate: Option<&Predicate>) -> Result<u64, Self::Error> {
        let records = self.records.read();
        let count = match predicate {
            Some(predicate) => records.iter().filter(|r| predicate.matches(*r)).count(),
            None => records.len(),
        };
        Ok(count as u64)
    }

    fn find_all(
        &self,
        predicate: Option<&Predicate>,
        order: &SortOrder,
    ) -> Result<Vec<R>, Self::Error> {
        Ok(self.matching(predicate, order))
    }

    fn find_page(
        &self,
        predicate: Option<&Predicate>,
        order: &SortOrder,
        page: PageSpec,
    ) -> Result<Vec<R>, Self::Error> {
        Ok(page.slice(self.matching(predicate, order)))
    }
}
