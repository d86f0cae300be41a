//! uifilter - compile table-widget filter requests into store queries
//!
//! A client sends a [`FilterRequest`](filter::FilterRequest): a page window,
//! sort fields, and per-field filter clauses named by logical field. The
//! crate resolves those names through a per-record-type
//! [`FieldRegistry`](registry::FieldRegistry), compiles a predicate, an
//! ordering, and a page, and runs them against any
//! [`RecordStore`](store::RecordStore).
//!
//! Subsystems:
//! - `registry`: logical field to attribute mapping, cached per record type
//! - `filter`: request model, match modes, predicate/sort/page compilers
//! - `store`: record store capability and an in-memory store
//! - `query`: count-and-find facade
//! - `heroes`: a worked record type and service
//! - `config`, `logging`, `cli`: the `uifilter` binary

pub mod cli;
pub mod config;
pub mod filter;
pub mod heroes;
pub mod logging;
pub mod query;
pub mod registry;
pub mod store;
