//! Predicate compiler
//!
//! Turns the `filters` of a request into one predicate:
//!
//! 1. Each key is one clause group. `global` fans every clause out to all
//!    global fields (OR); other keys resolve through the registry, and
//!    unknown keys drop their whole group.
//! 2. Clauses in a group combine with the last non-null operator given by
//!    any clause of the group, or OR when none is given.
//! 3. Groups combine with AND.
//!
//! No filters, or only unknown keys, compile to `None`: match everything.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::errors::{CompileResult, FilterError};
use super::match_mode::MatchMode;
use super::predicate::{FieldTest, Operand, Predicate, Test};
use super::request::{FilterClause, FilterOperator, FilterRequest, GLOBAL_KEY};
use crate::registry::{DataType, FieldDescriptor, FieldRegistry};

/// Compiles the request's filters against a registry
pub fn compile_predicate(
    request: &FilterRequest,
    registry: &FieldRegistry,
) -> CompileResult<Option<Predicate>> {
    let mut groups = Vec::with_capacity(request.filters.len());

    for (key, clauses) in &request.filters {
        if let Some(group) = compile_group(key, clauses, registry)? {
            groups.push(group);
        }
    }

    if groups.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Predicate::And(groups)))
    }
}

fn compile_group(
    key: &str,
    clauses: &[FilterClause],
    registry: &FieldRegistry,
) -> CompileResult<Option<Predicate>> {
    let target = if key == GLOBAL_KEY {
        None
    } else {
        match registry.lookup(key) {
            Some(descriptor) => Some(descriptor),
            None => {
                debug!(field = key, "skipping filter on unknown field");
                return Ok(None);
            }
        }
    };

    let mut operator = None;
    let mut tests = Vec::with_capacity(clauses.len());

    for clause in clauses {
        if clause.operator.is_some() {
            operator = clause.operator;
        }

        let test = match target {
            Some(descriptor) => compile_clause(key, descriptor, clause)?,
            None => Predicate::Or(
                registry
                    .global_fields()
                    .map(|(name, descriptor)| compile_clause(name, descriptor, clause))
                    .collect::<CompileResult<Vec<_>>>()?,
            ),
        };
        tests.push(test);
    }

    if tests.is_empty() {
        return Ok(None);
    }

    Ok(Some(match operator.unwrap_or(FilterOperator::Or) {
        FilterOperator::And => Predicate::And(tests),
        FilterOperator::Or => Predicate::Or(tests),
    }))
}

/// Compiles one clause against one resolved field
fn compile_clause(
    field: &str,
    descriptor: &FieldDescriptor,
    clause: &FilterClause,
) -> CompileResult<Predicate> {
    let data_type = descriptor.data_type;
    let mode = MatchMode::resolve(data_type, clause.match_mode);
    let unsupported = || FilterError::unsupported(field, mode, data_type);

    let test = match data_type {
        DataType::Text => Test::Text {
            op: mode.text_op().ok_or_else(unsupported)?,
            needle: text_value(field, &clause.value)?.to_lowercase(),
        },
        DataType::Numeric => Test::Compare {
            op: mode.compare_op().ok_or_else(unsupported)?,
            operand: numeric_value(field, &clause.value)?,
        },
        DataType::Date => Test::Compare {
            op: mode.compare_op().ok_or_else(unsupported)?,
            operand: Operand::Date(date_value(field, &clause.value)?),
        },
    };

    Ok(Predicate::Field(FieldTest::new(
        descriptor.attribute_name.as_str(),
        test,
    )))
}

fn text_value<'a>(field: &str, value: &'a Value) -> CompileResult<&'a str> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(FilterError::malformed(
            field,
            format!("expected a string, got {}", kind(other)),
        )),
    }
}

/// Integers stay integers; anything else numeric becomes a float
fn numeric_value(field: &str, value: &Value) -> CompileResult<Operand> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Ok(Operand::Integer(integer))
            } else if let Some(float) = number.as_f64() {
                Ok(Operand::Float(float))
            } else {
                Err(FilterError::malformed(field, format!("unrepresentable number {}", number)))
            }
        }
        other => Err(FilterError::malformed(
            field,
            format!("expected a number, got {}", kind(other)),
        )),
    }
}

fn date_value(field: &str, value: &Value) -> CompileResult<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_instant(text).ok_or_else(|| {
            FilterError::malformed(field, format!("'{}' is not an ISO-8601 instant", text))
        }),
        other => Err(FilterError::malformed(
            field,
            format!("expected an ISO-8601 instant string, got {}", kind(other)),
        )),
    }
}

/// Parses `YYYY-MM-DDTHH:MM[:SS[.fraction]]` followed by `Z` or an offset.
///
/// Letters match in either case. The date and time must be joined by `T`.
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.to_ascii_uppercase();
    if text.as_bytes().get(10) != Some(&b'T') {
        return None;
    }

    DateTime::parse_from_rfc3339(&text)
        .or_else(|_| DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M%#z"))
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "no value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::predicate::{CompareOp, TextOp};
    use crate::registry::{Attribute, FieldValue, Record};
    use chrono::TimeZone;
    use serde_json::json;

    struct Hero;

    impl Record for Hero {
        fn attributes() -> &'static [Attribute] {
            const ATTRIBUTES: &[Attribute] = &[
                Attribute::numeric("id"),
                Attribute::text("name"),
                Attribute::text("power"),
                Attribute::numeric("rating"),
                Attribute::date("power_date"),
            ];
            ATTRIBUTES
        }

        fn value(&self, _attribute: &str) -> FieldValue<'_> {
            FieldValue::Null
        }
    }

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .numeric("id", "id", false)
            .text("name", "name", true)
            .text("power", "power", true)
            .numeric("rating", "rating", false)
            .date("powerDate", "power_date", false)
            .build_for::<Hero>()
            .unwrap()
    }

    fn compile(request: serde_json::Value) -> CompileResult<Option<Predicate>> {
        let request: FilterRequest = serde_json::from_value(request).unwrap();
        compile_predicate(&request, &registry())
    }

    #[test]
    fn test_no_filters_is_none() {
        assert_eq!(compile(json!({})).unwrap(), None);
        assert_eq!(compile(json!({"filters": {}})).unwrap(), None);
    }

    #[test]
    fn test_unknown_fields_skipped() {
        assert_eq!(
            compile(json!({"filters": {"nickname": [{"value": "x"}]}})).unwrap(),
            None
        );

        let predicate = compile(json!({"filters": {
            "nickname": [{"value": "x"}],
            "name": [{"value": "x"}]
        }}))
        .unwrap()
        .unwrap();
        assert_eq!(
            predicate,
            Predicate::And(vec![Predicate::Or(vec![Predicate::text(
                "name",
                TextOp::Contains,
                "x"
            )])])
        );
    }

    #[test]
    fn test_text_defaults_to_contains() {
        let predicate = compile(json!({"filters": {"name": [{"value": "NiCe"}]}}))
            .unwrap()
            .unwrap();
        assert_eq!(predicate.to_string(), "lower(name) LIKE '%nice%'");
    }

    #[test]
    fn test_numeric_defaults_to_equals() {
        let predicate = compile(json!({"filters": {"rating": [{"value": 5}]}}))
            .unwrap()
            .unwrap();
        assert_eq!(
            predicate,
            Predicate::And(vec![Predicate::Or(vec![Predicate::compare(
                "rating",
                CompareOp::Eq,
                Operand::Integer(5)
            )])])
        );
    }

    #[test]
    fn test_float_operand() {
        let predicate = compile(json!({"filters": {"rating": [{"value": 2.5, "matchMode": "gt"}]}}))
            .unwrap()
            .unwrap();
        assert_eq!(predicate.to_string(), "rating > 2.5");
    }

    #[test]
    fn test_date_operand_uses_attribute_name() {
        let predicate = compile(json!({"filters": {
            "powerDate": [{"value": "2023-05-01T10:00:00+02:00", "matchMode": "dateAfter"}]
        }}))
        .unwrap()
        .unwrap();

        let instant = Utc.with_ymd_and_hms(2023, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(
            predicate,
            Predicate::And(vec![Predicate::Or(vec![Predicate::compare(
                "power_date",
                CompareOp::Gt,
                Operand::Date(instant)
            )])])
        );
    }

    #[test]
    fn test_date_without_seconds() {
        let predicate = compile(json!({"filters": {
            "powerDate": [{"value": "2023-05-01T10:00Z", "matchMode": "gt"}]
        }}))
        .unwrap()
        .unwrap();
        assert_eq!(predicate.to_string(), "power_date > '2023-05-01T10:00:00Z'");

        let predicate = compile(json!({"filters": {
            "powerDate": [{"value": "2023-05-01t10:00:00.250z", "matchMode": "lt"}]
        }}))
        .unwrap()
        .unwrap();
        assert_eq!(predicate.to_string(), "power_date < '2023-05-01T10:00:00.250Z'");
    }

    #[test]
    fn test_date_requires_t_separator() {
        for value in ["2023-05-01 10:00:00Z", "2023-05-01 10:00Z", "2023-05-01", "2023-05-01T10Z"] {
            let err = compile(json!({"filters": {
                "powerDate": [{"value": value, "matchMode": "gt"}]
            }}))
            .unwrap_err();
            assert_eq!(err.code(), "UIFILTER_MALFORMED_VALUE", "{}", value);
        }
    }

    #[test]
    fn test_last_operator_wins_for_whole_group() {
        let predicate = compile(json!({"filters": {"name": [
            {"value": "a", "operator": "or"},
            {"value": "b", "operator": "and"},
            {"value": "c"}
        ]}}))
        .unwrap()
        .unwrap();

        assert_eq!(
            predicate.to_string(),
            "(lower(name) LIKE '%a%' AND lower(name) LIKE '%b%' AND lower(name) LIKE '%c%')"
        );
    }

    #[test]
    fn test_global_fans_out_to_global_fields() {
        let predicate = compile(json!({"filters": {"global": [{"value": "fly"}]}}))
            .unwrap()
            .unwrap();

        assert_eq!(
            predicate.to_string(),
            "(lower(name) LIKE '%fly%' OR lower(power) LIKE '%fly%')"
        );
    }

    #[test]
    fn test_in_is_rejected() {
        let err = compile(json!({"filters": {"name": [{"value": ["a", "b"], "matchMode": "in"}]}}))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::UnsupportedMatchMode {
                field: "name".into(),
                mode: MatchMode::In,
                data_type: DataType::Text,
            }
        );
    }

    #[test]
    fn test_mode_type_mismatch_rejected() {
        let err = compile(json!({"filters": {"rating": [{"value": 3, "matchMode": "contains"}]}}))
            .unwrap_err();
        assert_eq!(err.code(), "UIFILTER_UNSUPPORTED_MATCH_MODE");

        let err = compile(json!({"filters": {"name": [{"value": "a", "matchMode": "gt"}]}}))
            .unwrap_err();
        assert_eq!(err.code(), "UIFILTER_UNSUPPORTED_MATCH_MODE");
    }

    #[test]
    fn test_malformed_values_rejected() {
        let cases = [
            json!({"filters": {"name": [{"matchMode": "contains"}]}}),
            json!({"filters": {"name": [{"value": 12}]}}),
            json!({"filters": {"rating": [{"value": "five"}]}}),
            json!({"filters": {"powerDate": [{"value": "yesterday"}]}}),
            json!({"filters": {"powerDate": [{"value": 1700000000}]}}),
        ];

        for case in cases {
            let err = compile(case.clone()).unwrap_err();
            assert_eq!(err.code(), "UIFILTER_MALFORMED_VALUE", "case {}", case);
        }
    }

    #[test]
    fn test_unknown_group_skipped_before_value_checks() {
        // A malformed clause under an unknown key never reaches coercion
        assert_eq!(
            compile(json!({"filters": {"nickname": [{"value": null, "matchMode": "in"}]}})).unwrap(),
            None
        );
    }
}
