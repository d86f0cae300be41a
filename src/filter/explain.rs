//! Explain output
//!
//! Shows what a request compiles to without running it against a store.

use std::fmt;

use serde::Serialize;

use super::compiler::compile_predicate;
use super::errors::CompileResult;
use super::page::{paginate, PageSpec};
use super::request::FilterRequest;
use super::sort::compile_sort;
use crate::registry::FieldRegistry;

/// Compiled form of one request
#[derive(Debug, Clone, Serialize)]
pub struct Explain {
    /// Rendered predicate; `None` matches every record
    pub predicate: Option<String>,
    /// Rendered ordering
    pub sort: String,
    /// Requested page; `None` returns every match
    pub page: Option<PageSpec>,
}

impl Explain {
    pub fn compile(
        request: &FilterRequest,
        registry: &FieldRegistry,
        default_field: Option<&str>,
    ) -> CompileResult<Self> {
        let predicate = compile_predicate(request, registry)?;
        let sort = compile_sort(request, registry, default_field);
        let page = paginate(request.rows, request.first);

        Ok(Self {
            predicate: predicate.map(|p| p.to_string()),
            sort: sort.to_string(),
            page,
        })
    }
}

impl fmt::Display for Explain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "filter: {}",
            self.predicate.as_deref().unwrap_or("(match all)")
        )?;
        writeln!(f, "sort:   {}", self.sort)?;
        match &self.page {
            Some(page) => write!(f, "page:   {}", page),
            None => write!(f, "page:   (all rows)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterClause, MatchMode};
    use crate::registry::{Attribute, FieldValue, Record};

    struct Note;

    impl Record for Note {
        fn attributes() -> &'static [Attribute] {
            const ATTRIBUTES: &[Attribute] = &[Attribute::numeric("id"), Attribute::text("body")];
            ATTRIBUTES
        }

        fn value(&self, _attribute: &str) -> FieldValue<'_> {
            FieldValue::Null
        }
    }

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .numeric("id", "id", false)
            .text("body", "body", true)
            .build_for::<Note>()
            .unwrap()
    }

    #[test]
    fn test_explain_empty_request() {
        let explain = Explain::compile(&FilterRequest::new(), &registry(), Some("id")).unwrap();

        assert_eq!(explain.predicate, None);
        assert_eq!(explain.sort, "id asc");
        assert_eq!(explain.page, None);
        assert!(explain.to_string().contains("(match all)"));
    }

    #[test]
    fn test_explain_full_request() {
        let request = FilterRequest::new()
            .with_page(20, 10)
            .with_sort("body", -1)
            .with_clause(
                "body",
                FilterClause::new("todo").with_match_mode(MatchMode::StartsWith),
            );

        let explain = Explain::compile(&request, &registry(), Some("id")).unwrap();

        assert_eq!(explain.predicate.as_deref(), Some("lower(body) LIKE 'todo%'"));
        assert_eq!(explain.sort, "body desc");
        assert_eq!(explain.page, Some(PageSpec::new(2, 10)));
    }

    #[test]
    fn test_explain_ignores_last() {
        let request = FilterRequest {
            first: Some(0),
            last: Some(10),
            ..Default::default()
        };

        let explain = Explain::compile(&request, &registry(), Some("id")).unwrap();

        assert_eq!(explain.page, None);
        assert!(explain.to_string().contains("(all rows)"));
    }

    #[test]
    fn test_explain_propagates_errors() {
        let request = FilterRequest::new().with_clause(
            "body",
            FilterClause::new("x").with_match_mode(MatchMode::Between),
        );
        assert!(Explain::compile(&request, &registry(), None).is_err());
    }
}
