//! Process-wide registry cache
//!
//! One registry per record type, keyed by `TypeId`. The first call for a type
//! builds and validates its registry; later calls only take the read lock.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use super::errors::RegistryResult;
use super::record::Record;
use super::registry::{FieldRegistry, FieldRegistryBuilder};

/// A record type with a static field declaration
pub trait Filterable: Record + 'static {
    /// Declares the logical fields of this record type
    fn declare_fields(builder: FieldRegistryBuilder) -> FieldRegistryBuilder;
}

static REGISTRIES: Lazy<RwLock<HashMap<TypeId, Arc<FieldRegistry>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the memoized registry for `R`, building it on first use.
///
/// A declaration error is returned every time and never cached.
pub fn registry_for<R: Filterable>() -> RegistryResult<Arc<FieldRegistry>> {
    let key = TypeId::of::<R>();

    if let Some(registry) = REGISTRIES.read().get(&key) {
        return Ok(Arc::clone(registry));
    }

    let built = Arc::new(R::declare_fields(FieldRegistry::builder()).build_for::<R>()?);

    // Two threads may race to build; the first insert wins and both share it.
    let mut registries = REGISTRIES.write();
    let registry = registries.entry(key).or_insert_with(|| {
        debug!(
            record = type_name::<R>(),
            fields = built.len(),
            "registered filter fields"
        );
        built
    });

    Ok(Arc::clone(registry))
}
