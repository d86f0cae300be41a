//! Hero queries
//!
//! Thin layer over the query facade that fixes the record type, the default
//! sort field, and the page-size ceiling.

use std::sync::Arc;

use tracing::debug;

use super::hero::{Hero, DEFAULT_SORT_FIELD};
use crate::filter::{
    FilterClause, FilterError, FilterRequest, MatchMode, PageSpec, Predicate, SortOrder,
};
use crate::query::{self, FilterResult, QueryError, QueryResult};
use crate::registry::{registry_for, FieldRegistry, RegistryResult};
use crate::store::RecordStore;

/// Page of heroes plus the total match count
pub type HeroFilterResult = FilterResult<Hero>;

/// Hero query service over any hero store
pub struct HeroService<S> {
    store: S,
    registry: Arc<FieldRegistry>,
    default_field: String,
    max_rows: u32,
}

impl<S: RecordStore<Record = Hero>> HeroService<S> {
    /// Creates a service with no page-size ceiling
    pub fn new(store: S) -> RegistryResult<Self> {
        Ok(Self {
            store,
            registry: registry_for::<Hero>()?,
            default_field: DEFAULT_SORT_FIELD.to_string(),
            max_rows: 0,
        })
    }

    /// Rejects requests asking for more than `max_rows` rows; 0 disables
    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Runs a client filter request
    pub fn find(&self, request: &FilterRequest) -> QueryResult<HeroFilterResult, S::Error> {
        self.check_page_size(request)?;
        query::find_matching(
            &self.store,
            request,
            &self.registry,
            Some(self.default_field.as_str()),
        )
    }

    /// Counts heroes matching a client filter request
    pub fn count(&self, request: &FilterRequest) -> QueryResult<u64, S::Error> {
        query::count_matching(&self.store, request, &self.registry)
    }

    /// Heroes whose name contains `name`, ignoring case
    pub fn search(&self, name: &str) -> QueryResult<Vec<Hero>, S::Error> {
        let request = FilterRequest::new().with_clause(
            "name",
            FilterClause::new(name).with_match_mode(MatchMode::Contains),
        );
        query::find_all(
            &self.store,
            &request,
            &self.registry,
            Some(self.default_field.as_str()),
        )
    }

    /// Highest-rated heroes first; unrated heroes never appear
    pub fn top_heroes(&self, count: u32) -> QueryResult<Vec<Hero>, S::Error> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let predicate = Predicate::not_null("rating");
        let order = SortOrder::desc("rating");
        debug!(count, predicate = %predicate, sort = %order, "top heroes");

        self.store
            .find_page(Some(&predicate), &order, PageSpec::new(0, count))
            .map_err(QueryError::Store)
    }

    pub fn find_by_id(&self, id: i64) -> QueryResult<Option<Hero>, S::Error> {
        let request = FilterRequest::new().with_clause(
            "id",
            FilterClause::new(id).with_match_mode(MatchMode::Equals),
        );
        let heroes = query::find_all(&self.store, &request, &self.registry, None)?;
        Ok(heroes.into_iter().next())
    }

    fn check_page_size(&self, request: &FilterRequest) -> Result<(), FilterError> {
        match request.rows {
            Some(requested) if self.max_rows > 0 && requested > self.max_rows => {
                Err(FilterError::PageTooLarge {
                    requested,
                    max: self.max_rows,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> HeroService<MemoryStore<Hero>> {
        HeroService::new(MemoryStore::new(Hero::initial_roster())).unwrap()
    }

    fn names(heroes: &[Hero]) -> Vec<&str> {
        heroes.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let heroes = service().search("MA").unwrap();
        assert_eq!(names(&heroes), vec!["Magneta", "RubberMan", "Dynama", "Magma"]);
    }

    #[test]
    fn test_search_empty_name_matches_all() {
        assert_eq!(service().search("").unwrap().len(), 9);
    }

    #[test]
    fn test_top_heroes() {
        let heroes = service().top_heroes(5).unwrap();
        assert_eq!(
            names(&heroes),
            vec!["Celeritas", "Magneta", "RubberMan", "Dynama", "Bombasto"]
        );
    }

    #[test]
    fn test_top_heroes_skips_unrated() {
        let service = service();
        service.store().insert(Hero::new(10, "Unrated"));

        let heroes = service.top_heroes(100).unwrap();
        assert_eq!(heroes.len(), 9);
        assert!(heroes.iter().all(|h| h.rating.is_some()));
    }

    #[test]
    fn test_top_heroes_zero() {
        assert!(service().top_heroes(0).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let service = service();
        assert_eq!(service.find_by_id(4).unwrap().unwrap().name, "Magneta");
        assert!(service.find_by_id(99).unwrap().is_none());
    }

    #[test]
    fn test_find_enforces_max_rows() {
        let service = service().with_max_rows(5);

        let err = service
            .find(&FilterRequest::new().with_page(0, 6))
            .unwrap_err();
        assert_eq!(err.code(), "UIFILTER_PAGE_TOO_LARGE");

        let result = service.find(&FilterRequest::new().with_page(5, 5)).unwrap();
        assert_eq!(result.total_records, 9);
        assert_eq!(names(&result.records), vec!["Dynama", "Dr. IQ", "Magma", "Tornado"]);
    }

    #[test]
    fn test_max_rows_ignores_last() {
        let service = service().with_max_rows(5);
        let request = FilterRequest {
            last: Some(50),
            ..Default::default()
        };

        let result = service.find(&request).unwrap();
        assert_eq!(result.len(), 9);
    }

    #[test]
    fn test_find_uses_default_field() {
        let service = service().with_default_field("name");
        let result = service.find(&FilterRequest::new().with_page(0, 3)).unwrap();
        assert_eq!(names(&result.records), vec!["Bombasto", "Celeritas", "Dr. IQ"]);
    }
}
