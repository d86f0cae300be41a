//! Field registry subsystem for uifilter
//!
//! Maps the logical field names a client filters and sorts on to the physical
//! attributes of one record type.
//!
//! # Design Principles
//!
//! - Static declaration: each record type declares its fields once
//! - Validated once: a declaration naming a missing attribute fails at build time
//! - Read-only after construction: request handling never mutates a registry
//! - Memoized: one registry per record type, shared process-wide
//!
//! Unknown logical names are not errors. Lookups return `None` and callers skip.

mod cache;
mod errors;
mod record;
mod registry;
mod types;

pub use cache::{registry_for, Filterable};
pub use errors::{RegistryError, RegistryResult};
pub use record::{Attribute, FieldValue, Record};
pub use registry::{FieldRegistry, FieldRegistryBuilder};
pub use types::{DataType, FieldDeclaration, FieldDescriptor};
