//! Filtered query facade for uifilter
//!
//! Composes the registry, the predicate and sort compilers, and the paginator
//! into the three operations callers use against a record store.
//!
//! # Consistency
//!
//! `find_matching` issues a count and a find as two separate store calls.
//! Nothing ties them to one snapshot, so under concurrent writes
//! `total_records` may disagree with the returned page.

mod errors;
mod facade;
mod result;

pub use errors::{QueryError, QueryResult};
pub use facade::{count_matching, find_all, find_matching};
pub use result::FilterResult;
