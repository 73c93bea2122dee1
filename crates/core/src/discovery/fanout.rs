//! Concurrent execution of a query plan against the catalog.

use std::time::Instant;

use tracing::{debug, warn};

use crate::external_catalog::{CatalogItem, CatalogQuery, ExternalCatalog};
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION};

use super::planner::QueryPlan;

/// Request parameters shared by every query of one fan-out.
#[derive(Debug, Clone, Default)]
pub struct FanOutOptions {
    pub max_results: u32,
    pub lang_restrict: Option<String>,
    pub order_by: Option<String>,
}

/// Run every planned query concurrently and wait for all of them.
///
/// The result has one list per planned query, in plan order. A failed
/// query contributes an empty list; it never fails the whole fan-out.
pub async fn fan_out(
    catalog: &dyn ExternalCatalog,
    plan: &QueryPlan,
    options: &FanOutOptions,
) -> Vec<Vec<CatalogItem>> {
    let search_futures: Vec<_> = plan
        .queries()
        .iter()
        .map(|planned| {
            let query = CatalogQuery {
                term: planned.term.clone(),
                start_index: planned.start_index,
                max_results: options.max_results,
                lang_restrict: options.lang_restrict.clone(),
                order_by: options.order_by.clone(),
            };
            async move {
                let start = Instant::now();
                let result = catalog.search_volumes(&query).await;
                CATALOG_REQUEST_DURATION
                    .with_label_values(&[catalog.name()])
                    .observe(start.elapsed().as_secs_f64());
                (query, result)
            }
        })
        .collect();

    let results = futures::future::join_all(search_futures).await;

    results
        .into_iter()
        .map(|(query, result)| match result {
            Ok(items) => {
                CATALOG_REQUESTS
                    .with_label_values(&[catalog.name(), "success"])
                    .inc();
                items
            }
            Err(e) => {
                CATALOG_REQUESTS
                    .with_label_values(&[catalog.name(), "error"])
                    .inc();
                warn!(
                    q = %query.term,
                    start_index = query.start_index,
                    error = %e,
                    "Catalog query failed, treating as no results"
                );
                Vec::new()
            }
        })
        .inspect(|items| debug!(items = items.len(), "Catalog contribution"))
        .collect()
}
