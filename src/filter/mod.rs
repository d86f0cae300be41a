//! Filter compiler subsystem for uifilter
//!
//! Compiles a declarative filter request into three things a record store can
//! execute: a predicate, an ordering, and an optional page.
//!
//! # Compilation Flow
//!
//! 1. Resolve each filter key through the field registry (unknown keys skip)
//! 2. Resolve each clause's match mode against the field's data type
//! 3. Coerce clause values to typed operands
//! 4. Combine clauses per group, then groups with AND
//! 5. Resolve sort fields into attribute keys, falling back to a default
//! 6. Derive the page index from `first` and `rows`
//!
//! Compilation is pure. Nothing is cached and nothing blocks.

mod compiler;
mod errors;
mod explain;
mod match_mode;
mod page;
mod predicate;
mod request;
mod sort;

pub use compiler::compile_predicate;
pub use errors::{CompileResult, FilterError};
pub use explain::Explain;
pub use match_mode::MatchMode;
pub use page::{paginate, PageSpec};
pub use predicate::{CompareOp, FieldTest, Operand, Predicate, Test, TextOp};
pub use request::{FilterClause, FilterOperator, FilterRequest, SortField, GLOBAL_KEY};
pub use sort::{compile_sort, SortDirection, SortKey, SortOrder};
