//! Record access
//!
//! The compiler never knows a record's concrete shape. A record type lists its
//! attributes once and answers by-name value lookups; that is all the
//! predicate evaluator and the sorter need.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::types::DataType;

/// A physical attribute exposed by a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub data_type: DataType,
}

impl Attribute {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Text,
        }
    }

    pub const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Numeric,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Date,
        }
    }
}

/// A record that can be filtered and sorted by attribute name
pub trait Record {
    /// Attributes this record type exposes
    fn attributes() -> &'static [Attribute];

    /// Value of the named attribute.
    ///
    /// Returns `FieldValue::Null` for unset values and for names that are not
    /// attributes of this type.
    fn value(&self, attribute: &str) -> FieldValue<'_>;
}

/// Value of one attribute on one record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(Cow<'a, str>),
    Integer(i64),
    Float(f64),
    Date(DateTime<Utc>),
}

impl FieldValue<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Ordering used when sorting records.
    ///
    /// Nulls sort after every non-null value. Integers and floats compare
    /// numerically with each other. Values of unrelated kinds compare equal.
    pub fn sort_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        use FieldValue::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Greater,
            (_, Null) => Ordering::Less,
            (Text(a), Text(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Date(a), Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_nulls_sort_last() {
        let null = FieldValue::Null;
        let one = FieldValue::Integer(1);

        assert_eq!(null.sort_cmp(&one), Ordering::Greater);
        assert_eq!(one.sort_cmp(&null), Ordering::Less);
        assert_eq!(null.sort_cmp(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_mixed_numeric_ordering() {
        assert_eq!(
            FieldValue::Integer(2).sort_cmp(&FieldValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Float(3.0).sort_cmp(&FieldValue::Integer(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_date_ordering() {
        let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            FieldValue::from(early).sort_cmp(&FieldValue::from(late)),
            Ordering::Less
        );
    }

    #[test]
    fn test_option_conversion() {
        let missing: Option<i32> = None;
        assert!(FieldValue::from(missing).is_null());
        assert_eq!(FieldValue::from(Some(4)), FieldValue::Integer(4));
    }
}
