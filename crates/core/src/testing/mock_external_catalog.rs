//! Mock external catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::external_catalog::{
    CatalogItem, CatalogQuery, ExternalCatalog, ExternalCatalogError, QueryTerm,
};

/// Mock implementation of the ExternalCatalog trait.
///
/// Results are keyed by the rendered query string and the start offset, so
/// `inauthor:Tolstoy` at offset 40 is a different page than at offset 0.
/// Unknown queries return an empty list.
///
/// # Example
///
/// ```rust,ignore
/// use shelfscout_core::testing::{MockExternalCatalog, fixtures};
///
/// let catalog = MockExternalCatalog::new();
/// catalog
///     .set_results(&QueryTerm::Author("Tolstoy".into()), vec![fixtures::catalog_item("1", "War and Peace")])
///     .await;
/// catalog.fail_term(&QueryTerm::Title("Tolstoy".into())).await;
/// ```
#[derive(Debug)]
pub struct MockExternalCatalog {
    /// Canned pages by (rendered query, start index).
    pages: Arc<RwLock<HashMap<(String, u32), Vec<CatalogItem>>>>,
    /// Rendered queries that fail on every page.
    failing: Arc<RwLock<HashSet<String>>>,
    /// When set, every query fails.
    fail_all: Arc<RwLock<bool>>,
    /// Simulated response latency by rendered query.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<CatalogQuery>>>,
}

impl Default for MockExternalCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExternalCatalog {
    /// Create a new empty mock external catalog.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            fail_all: Arc::new(RwLock::new(false)),
            delays: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // =========================================================================
    // Result Configuration
    // =========================================================================

    /// Set the first page (offset 0) returned for `term`.
    pub async fn set_results(&self, term: &QueryTerm, items: Vec<CatalogItem>) {
        self.set_page(term, 0, items).await;
    }

    /// Set the page returned for `term` at `start_index`.
    pub async fn set_page(&self, term: &QueryTerm, start_index: u32, items: Vec<CatalogItem>) {
        self.pages
            .write()
            .await
            .insert((term.to_string(), start_index), items);
    }

    /// Delay every response for `term` by `delay`.
    pub async fn set_delay(&self, term: &QueryTerm, delay: Duration) {
        self.delays.write().await.insert(term.to_string(), delay);
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Make every page of `term` fail with a 503.
    pub async fn fail_term(&self, term: &QueryTerm) {
        self.failing.write().await.insert(term.to_string());
    }

    /// Make every query fail, or stop doing so.
    pub async fn fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<CatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[async_trait]
impl ExternalCatalog for MockExternalCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_volumes(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogItem>, ExternalCatalogError> {
        self.queries.write().await.push(query.clone());

        let rendered = query.term.to_string();
        let delay = self.delays.read().await.get(&rendered).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_all.read().await || self.failing.read().await.contains(&rendered) {
            return Err(ExternalCatalogError::ApiError {
                status: 503,
                message: format!("mock failure for {}", rendered),
            });
        }

        let items = self
            .pages
            .read()
            .await
            .get(&(rendered, query.start_index))
            .cloned()
            .unwrap_or_default();

        Ok(items
            .into_iter()
            .take(query.max_results as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_results_are_keyed_by_term_and_offset() {
        let catalog = MockExternalCatalog::new();
        let term = QueryTerm::Author("Tolstoy".into());
        catalog
            .set_results(&term, vec![fixtures::catalog_item("1", "War and Peace")])
            .await;
        catalog
            .set_page(&term, 40, vec![fixtures::catalog_item("2", "Resurrection")])
            .await;

        let first = catalog.search_volumes(&CatalogQuery::new(term.clone())).await.unwrap();
        assert_eq!(first[0].id, "1");

        let mut query = CatalogQuery::new(term);
        query.start_index = 40;
        let second = catalog.search_volumes(&query).await.unwrap();
        assert_eq!(second[0].id, "2");

        // Same value, different scope
        let other = catalog
            .search_volumes(&CatalogQuery::new(QueryTerm::Title("Tolstoy".into())))
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_max_results_truncates_page() {
        let catalog = MockExternalCatalog::new();
        let term = QueryTerm::Keyword("x".into());
        catalog
            .set_results(
                &term,
                (0..5).map(|i| fixtures::catalog_item(&i.to_string(), "T")).collect(),
            )
            .await;

        let mut query = CatalogQuery::new(term);
        query.max_results = 2;
        assert_eq!(catalog.search_volumes(&query).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let catalog = MockExternalCatalog::new();
        let term = QueryTerm::Genre("Fiction".into());
        catalog.fail_term(&term).await;

        let result = catalog.search_volumes(&CatalogQuery::new(term)).await;
        assert!(matches!(
            result,
            Err(ExternalCatalogError::ApiError { status: 503, .. })
        ));

        catalog.fail_all(true).await;
        let result = catalog
            .search_volumes(&CatalogQuery::new(QueryTerm::Keyword("ok".into())))
            .await;
        assert!(result.is_err());

        catalog.fail_all(false).await;
        let result = catalog
            .search_volumes(&CatalogQuery::new(QueryTerm::Keyword("ok".into())))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_recorded_queries() {
        let catalog = MockExternalCatalog::new();
        catalog.fail_term(&QueryTerm::Title("a".into())).await;

        catalog
            .search_volumes(&CatalogQuery::new(QueryTerm::Title("a".into())))
            .await
            .ok();
        catalog
            .search_volumes(&CatalogQuery::new(QueryTerm::Author("b".into())))
            .await
            .ok();

        // Failed queries are recorded too
        let queries = catalog.recorded_queries().await;
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].term.to_string(), "intitle:a");
        assert_eq!(queries[1].term.to_string(), "inauthor:b");

        catalog.clear_recorded().await;
        assert_eq!(catalog.query_count().await, 0);
    }
}
