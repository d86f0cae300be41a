//! Sort compiler
//!
//! Resolves the request's sort fields through the registry into an ordered
//! list of attribute keys. Unknown fields are dropped. With no sort fields the
//! default field is used, and without a resolvable default the order is left
//! to the store.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use super::request::FilterRequest;
use crate::registry::{FieldRegistry, Record};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `order > 0` is ascending, anything else descending
    pub fn from_order(order: i32) -> Self {
        if order > 0 {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort key over a physical attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub attribute: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Lexicographic ordering over sort keys. No keys means unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl SortOrder {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn asc(attribute: impl Into<String>) -> Self {
        Self::by(vec![SortKey::asc(attribute)])
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self::by(vec![SortKey::desc(attribute)])
    }

    pub fn is_unsorted(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compares two records key by key
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            let ordering = a
                .value(&key.attribute)
                .sort_cmp(&b.value(&key.attribute));

            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable sort; unsorted leaves the slice untouched
    pub fn sort<R: Record>(&self, records: &mut [R]) {
        if !self.is_unsorted() {
            records.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "unsorted");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", key.attribute, key.direction.as_str())?;
        }
        Ok(())
    }
}

/// Builds the ordering for a request
pub fn compile_sort(
    request: &FilterRequest,
    registry: &FieldRegistry,
    default_field: Option<&str>,
) -> SortOrder {
    if request.sort_fields.is_empty() {
        return default_field
            .filter(|field| !field.trim().is_empty())
            .and_then(|field| registry.lookup(field))
            .map_or_else(SortOrder::unsorted, |descriptor| {
                SortOrder::asc(descriptor.attribute_name.as_str())
            });
    }

    let keys = request
        .sort_fields
        .iter()
        .filter_map(|sort_field| match registry.lookup(&sort_field.field) {
            Some(descriptor) => Some(SortKey {
                attribute: descriptor.attribute_name.clone(),
                direction: SortDirection::from_order(sort_field.order),
            }),
            None => {
                debug!(field = %sort_field.field, "dropping sort on unknown field");
                None
            }
        })
        .collect();

    SortOrder::by(keys)
}
