//! Facade operations
//!
//! Each call recompiles the request from scratch. Compilation errors are
//! returned before the store is touched.

use tracing::{debug, info};

use super::errors::{QueryError, QueryResult};
use super::result::FilterResult;
use crate::filter::{compile_predicate, compile_sort, paginate, FilterRequest, Predicate};
use crate::registry::FieldRegistry;
use crate::store::RecordStore;

/// Counts the records matching the request's filters
pub fn count_matching<S: RecordStore>(
    store: &S,
    request: &FilterRequest,
    registry: &FieldRegistry,
) -> QueryResult<u64, S::Error> {
    let predicate = compile_predicate(request, registry)?;

    let count = store
        .count(predicate.as_ref())
        .map_err(QueryError::Store)?;

    debug!(count, "counted matching records");
    Ok(count)
}

/// Finds the requested page of matches together with the total match count
pub fn find_matching<S: RecordStore>(
    store: &S,
    request: &FilterRequest,
    registry: &FieldRegistry,
    default_field: Option<&str>,
) -> QueryResult<FilterResult<S::Record>, S::Error> {
    let predicate = compile_predicate(request, registry)?;

    let total_records = store
        .count(predicate.as_ref())
        .map_err(QueryError::Store)?;
    let records = fetch(store, request, registry, default_field, predicate)?;

    info!(
        total_records,
        returned = records.len(),
        "filter query complete"
    );
    Ok(FilterResult::new(records, total_records))
}

/// Finds matches without counting; paginated when the request asks for a page
pub fn find_all<S: RecordStore>(
    store: &S,
    request: &FilterRequest,
    registry: &FieldRegistry,
    default_field: Option<&str>,
) -> QueryResult<Vec<S::Record>, S::Error> {
    let predicate = compile_predicate(request, registry)?;
    fetch(store, request, registry, default_field, predicate)
}

fn fetch<S: RecordStore>(
    store: &S,
    request: &FilterRequest,
    registry: &FieldRegistry,
    default_field: Option<&str>,
    predicate: Option<Predicate>,
) -> QueryResult<Vec<S::Record>, S::Error> {
    let order = compile_sort(request, registry, default_field);
    let page = paginate(request.rows, request.first);

    debug!(
        predicate = %predicate.as_ref().map_or_else(|| "(match all)".to_string(), |p| p.to_string()),
        sort = %order,
        page = ?page,
        "compiled filter request"
    );

    let records = match page {
        Some(page) => store.find_page(predicate.as_ref(), &order, page),
        None => store.find_all(predicate.as_ref(), &order),
    };
    records.map_err(QueryError::Store)
}
