//! Compiled predicates
//!
//! A predicate is an AND/OR tree of field tests. Operands are already coerced
//! to the field's data type, so evaluation never fails.
//!
//! A null attribute satisfies no test, negated tests included. This matches
//! how a relational store treats NULL in a WHERE clause.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::registry::{FieldValue, Record};

/// Boolean test over one record
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every child matches. An empty conjunction matches everything.
    And(Vec<Predicate>),
    /// Some child matches. An empty disjunction matches nothing.
    Or(Vec<Predicate>),
    /// Single attribute test
    Field(FieldTest),
}

impl Predicate {
    pub fn and(children: Vec<Predicate>) -> Self {
        Predicate::And(children)
    }

    pub fn or(children: Vec<Predicate>) -> Self {
        Predicate::Or(children)
    }

    /// Attribute is not null
    pub fn not_null(attribute: impl Into<String>) -> Self {
        Predicate::Field(FieldTest::new(attribute, Test::NotNull))
    }

    /// Ordered comparison of an attribute against an operand
    pub fn compare(attribute: impl Into<String>, op: CompareOp, operand: Operand) -> Self {
        Predicate::Field(FieldTest::new(attribute, Test::Compare { op, operand }))
    }

    /// Case-insensitive string test
    pub fn text(attribute: impl Into<String>, op: TextOp, needle: &str) -> Self {
        Predicate::Field(FieldTest::new(
            attribute,
            Test::Text {
                op,
                needle: needle.to_lowercase(),
            },
        ))
    }

    /// Evaluates this predicate against a record
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Predicate::And(children) => children.iter().all(|child| child.matches(record)),
            Predicate::Or(children) => children.iter().any(|child| child.matches(record)),
            Predicate::Field(test) => test.matches(record),
        }
    }
}

/// Test applied to one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTest {
    /// Physical attribute name
    pub attribute: String,
    pub test: Test,
}

impl FieldTest {
    pub fn new(attribute: impl Into<String>, test: Test) -> Self {
        Self {
            attribute: attribute.into(),
            test,
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.test.evaluate(&record.value(&self.attribute))
    }
}

/// The comparison itself
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    /// String test; `needle` is stored lowercased
    Text { op: TextOp, needle: String },
    /// Ordered comparison against a typed operand
    Compare { op: CompareOp, operand: Operand },
    /// Attribute has a value
    NotNull,
}

impl Test {
    fn evaluate(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (_, FieldValue::Null) => false,
            (Test::NotNull, _) => true,
            (Test::Text { op, needle }, FieldValue::Text(text)) => {
                op.apply(&text.to_lowercase(), needle)
            }
            (Test::Compare { op, operand }, value) => operand
                .compare(value)
                .map_or(false, |ordering| op.accepts(ordering)),
            _ => false,
        }
    }
}

/// Case-insensitive string tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
}

impl TextOp {
    fn apply(&self, haystack: &str, needle: &str) -> bool {
        match self {
            TextOp::Contains => haystack.contains(needle),
            TextOp::NotContains => !haystack.contains(needle),
            TextOp::StartsWith => haystack.starts_with(needle),
            TextOp::EndsWith => haystack.ends_with(needle),
            TextOp::Equals => haystack == needle,
            TextOp::NotEquals => haystack != needle,
        }
    }
}

/// Ordered comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Whether `value.cmp(operand)` satisfies this comparison
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Typed right-hand side of a comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Integer(i64),
    Float(f64),
    Date(DateTime<Utc>),
}

impl Operand {
    /// Orders a stored value relative to this operand.
    ///
    /// `None` when the kinds cannot be compared, or a float is NaN.
    fn compare(&self, value: &FieldValue<'_>) -> Option<Ordering> {
        match (value, self) {
            (FieldValue::Integer(a), Operand::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), Operand::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), Operand::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Float(a), Operand::Float(b)) => a.partial_cmp(b),
            (FieldValue::Date(a), Operand::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Integer(value) => write!(f, "{}", value),
            Operand::Float(value) => write!(f, "{}", value),
            Operand::Date(value) => {
                write!(f, "'{}'", value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl fmt::Display for FieldTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attr = &self.attribute;
        match &self.test {
            Test::NotNull => write!(f, "{} IS NOT NULL", attr),
            Test::Compare { op, operand } => write!(f, "{} {} {}", attr, op.symbol(), operand),
            Test::Text { op, needle } => {
                let needle = needle.replace('\'', "''");
                match op {
                    TextOp::Contains => write!(f, "lower({}) LIKE '%{}%'", attr, needle),
                    TextOp::NotContains => write!(f, "lower({}) NOT LIKE '%{}%'", attr, needle),
                    TextOp::StartsWith => write!(f, "lower({}) LIKE '{}%'", attr, needle),
                    TextOp::EndsWith => write!(f, "lower({}) LIKE '%{}'", attr, needle),
                    TextOp::Equals => write!(f, "lower({}) = '{}'", attr, needle),
                    TextOp::NotEquals => write!(f, "lower({}) <> '{}'", attr, needle),
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, joiner, empty) = match self {
            Predicate::Field(test) => return write!(f, "{}", test),
            Predicate::And(children) => (children, " AND ", "TRUE"),
            Predicate::Or(children) => (children, " OR ", "FALSE"),
        };

        match children.as_slice() {
            [] => write!(f, "{}", empty),
            [only] => write!(f, "{}", only),
            _ => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", joiner)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Attribute;
    use chrono::TimeZone;

    struct Row {
        name: Option<&'static str>,
        score: Option<i64>,
        ratio: f64,
        seen: DateTime<Utc>,
    }

    impl Record for Row {
        fn attributes() -> &'static [Attribute] {
            &[]
        }

        fn value(&self, attribute: &str) -> FieldValue<'_> {
            match attribute {
                "name" => self.name.into(),
                "score" => self.score.into(),
                "ratio" => self.ratio.into(),
                "seen" => self.seen.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn row(name: Option<&'static str>, score: Option<i64>) -> Row {
        Row {
            name,
            score,
            ratio: 0.5,
            seen: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let record = row(Some("Dr. Nice"), None);

        assert!(Predicate::text("name", TextOp::Contains, "NICE").matches(&record));
        assert!(Predicate::text("name", TextOp::StartsWith, "dr").matches(&record));
        assert!(Predicate::text("name", TextOp::EndsWith, "Ice").matches(&record));
        assert!(Predicate::text("name", TextOp::Equals, "dr. nice").matches(&record));
        assert!(!Predicate::text("name", TextOp::NotContains, "nice").matches(&record));
        assert!(Predicate::text("name", TextOp::NotEquals, "dr.").matches(&record));
    }

    #[test]
    fn test_null_satisfies_nothing() {
        let record = row(None, None);

        assert!(!Predicate::text("name", TextOp::NotContains, "x").matches(&record));
        assert!(!Predicate::text("name", TextOp::NotEquals, "x").matches(&record));
        assert!(!Predicate::compare("score", CompareOp::Ne, Operand::Integer(1)).matches(&record));
        assert!(!Predicate::not_null("score").matches(&record));
    }

    #[test]
    fn test_numeric_comparisons() {
        let record = row(None, Some(4));

        assert!(Predicate::compare("score", CompareOp::Eq, Operand::Integer(4)).matches(&record));
        assert!(Predicate::compare("score", CompareOp::Gte, Operand::Integer(4)).matches(&record));
        assert!(!Predicate::compare("score", CompareOp::Gt, Operand::Integer(4)).matches(&record));
        assert!(Predicate::compare("score", CompareOp::Lt, Operand::Float(4.5)).matches(&record));
        assert!(Predicate::compare("ratio", CompareOp::Lte, Operand::Integer(1)).matches(&record));
    }

    #[test]
    fn test_date_comparisons() {
        let record = row(None, None);
        let before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(Predicate::compare("seen", CompareOp::Gt, Operand::Date(before)).matches(&record));
        assert!(!Predicate::compare("seen", CompareOp::Eq, Operand::Date(before)).matches(&record));
    }

    #[test]
    fn test_kind_mismatch_never_matches() {
        let record = row(Some("5"), Some(5));
        assert!(!Predicate::compare("name", CompareOp::Eq, Operand::Integer(5)).matches(&record));
    }

    #[test]
    fn test_empty_groups() {
        let record = row(None, None);
        assert!(Predicate::and(vec![]).matches(&record));
        assert!(!Predicate::or(vec![]).matches(&record));
    }

    #[test]
    fn test_display() {
        let predicate = Predicate::and(vec![
            Predicate::or(vec![
                Predicate::text("name", TextOp::Contains, "Man"),
                Predicate::text("power", TextOp::StartsWith, "fly"),
            ]),
            Predicate::compare("rating", CompareOp::Gte, Operand::Integer(4)),
        ]);

        assert_eq!(
            predicate.to_string(),
            "((lower(name) LIKE '%man%' OR lower(power) LIKE 'fly%') AND rating >= 4)"
        );
    }

    #[test]
    fn test_display_escapes_quotes() {
        let predicate = Predicate::text("alter_ego", TextOp::Equals, "O'Brien");
        assert_eq!(predicate.to_string(), "lower(alter_ego) = 'o''brien'");

        let record = Row {
            name: Some("Pat O'Brien"),
            ..row(None, None)
        };
        assert!(Predicate::text("name", TextOp::EndsWith, "o'brien").matches(&record));
    }
}
