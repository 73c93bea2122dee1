//! Discovery service: planner, fan-out, merge and normalizer wired
//! together for the two public entry points.

use std::sync::Arc;

use tracing::info;

use crate::config::{DiscoveryConfig, FacetSelection};
use crate::external_catalog::ExternalCatalog;
use crate::metrics::{BOOKS_RETURNED, QUERIES_PLANNED};

use super::facets::RankedFacets;
use super::fanout::{fan_out, FanOutOptions};
use super::merge::merge_unique;
use super::normalize::Normalizer;
use super::planner::{
    plan_recommendations, plan_search, FacetLimits, FacetSelector, RandomFacet, SearchPaging,
    TopFacets,
};
use super::types::{DiscoveryError, ExclusionSet, ReadBook, RecommendedBook, SearchCandidate};

/// Stateless book discovery over an external catalog.
pub struct DiscoveryService {
    catalog: Arc<dyn ExternalCatalog>,
    config: DiscoveryConfig,
    selector: Arc<dyn FacetSelector>,
    normalizer: Normalizer,
}

impl DiscoveryService {
    /// Create a service; the facet selector follows `config.facet_selection`.
    pub fn new(catalog: Arc<dyn ExternalCatalog>, config: DiscoveryConfig) -> Self {
        let selector: Arc<dyn FacetSelector> = match config.facet_selection {
            FacetSelection::Top => Arc::new(TopFacets),
            FacetSelection::Random => Arc::new(RandomFacet::new()),
        };
        let normalizer = Normalizer::new(config.unknown_author.clone());

        Self {
            catalog,
            config,
            selector,
            normalizer,
        }
    }

    /// Replace the facet selector (seeded selectors in tests).
    pub fn with_selector(mut self, selector: Arc<dyn FacetSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Interactive search for a free-text term.
    ///
    /// Fails only when the term is blank; upstream failures shrink the
    /// result instead.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchCandidate>, DiscoveryError> {
        let plan = plan_search(
            term,
            SearchPaging {
                page_size: self.config.search_page_size,
                pages: self.config.search_pages,
            },
        )?;
        QUERIES_PLANNED
            .with_label_values(&["search"])
            .observe(plan.len() as f64);

        let options = FanOutOptions {
            max_results: self.config.search_page_size,
            lang_restrict: None,
            order_by: None,
        };
        let lists = fan_out(self.catalog.as_ref(), &plan, &options).await;
        let raw_count: usize = lists.iter().map(Vec::len).sum();
        let merged = merge_unique(lists);
        let candidates = self.normalizer.search_candidates(&merged);

        BOOKS_RETURNED
            .with_label_values(&["search"])
            .observe(candidates.len() as f64);
        info!(
            queries = plan.len(),
            raw = raw_count,
            merged = merged.len(),
            returned = candidates.len(),
            "Search complete"
        );

        Ok(candidates)
    }

    /// Recommendations from caller-ranked facets.
    ///
    /// Upstream failures yield fewer (possibly zero) books, never an error.
    pub async fn recommend(
        &self,
        facets: &RankedFacets,
        exclude: &ExclusionSet,
    ) -> Vec<RecommendedBook> {
        let facets = self.without_placeholder_author(facets);
        let plan = plan_recommendations(
            &facets,
            self.selector.as_ref(),
            FacetLimits {
                max_authors: self.config.max_authors,
                max_genres: self.config.max_genres,
            },
            &self.config.default_query,
        );
        QUERIES_PLANNED
            .with_label_values(&["recommend"])
            .observe(plan.len() as f64);

        let options = FanOutOptions {
            max_results: self.config.recommend_page_size,
            lang_restrict: self
                .config
                .recommend_lang
                .clone()
                .filter(|lang| !lang.is_empty()),
            order_by: self.config.order_by.clone().filter(|o| !o.is_empty()),
        };
        let lists = fan_out(self.catalog.as_ref(), &plan, &options).await;
        let merged = merge_unique(lists);
        let books =
            self.normalizer
                .recommendations(&merged, exclude, self.config.recommend_limit);

        BOOKS_RETURNED
            .with_label_values(&["recommend"])
            .observe(books.len() as f64);
        info!(
            selector = self.selector.name(),
            queries = ?plan.rendered(),
            excluded = exclude.len(),
            merged = merged.len(),
            returned = books.len(),
            "Recommendations complete"
        );

        books
    }

    /// Recommendations from a reading history.
    ///
    /// Facets are ranked from finished books; every catalog id in the
    /// history is excluded on top of `exclude`.
    pub async fn recommend_from_history(
        &self,
        history: &[ReadBook],
        mut exclude: ExclusionSet,
    ) -> Vec<RecommendedBook> {
        exclude.extend(history.iter().filter_map(|b| b.catalog_id.clone()));
        let facets = RankedFacets::from_history(history);
        self.recommend(&facets, &exclude).await
    }

    /// Books saved without an author carry the placeholder as author text;
    /// it is not a useful query.
    fn without_placeholder_author(&self, facets: &RankedFacets) -> RankedFacets {
        RankedFacets {
            authors: facets
                .authors
                .iter()
                .filter(|a| a.trim() != self.config.unknown_author)
                .cloned()
                .collect(),
            genres: facets.genres.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::BookStatus;
    use crate::external_catalog::QueryTerm;
    use crate::testing::{fixtures, MockExternalCatalog};

    fn service(catalog: &Arc<MockExternalCatalog>) -> DiscoveryService {
        DiscoveryService::new(
            Arc::clone(catalog) as Arc<dyn ExternalCatalog>,
            DiscoveryConfig::default(),
        )
    }

    fn ids<T, F: Fn(&T) -> &str>(items: &[T], id: F) -> Vec<&str> {
        items.iter().map(id).collect()
    }

    #[tokio::test]
    async fn test_search_issues_six_queries_and_merges_by_priority() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog
            .set_results(
                &QueryTerm::Title("Tolstoy".into()),
                vec![fixtures::catalog_item("t1", "Tolstoy: A Life")],
            )
            .await;
        catalog
            .set_results(
                &QueryTerm::Author("Tolstoy".into()),
                vec![
                    fixtures::catalog_item("a1", "War and Peace"),
                    fixtures::catalog_item("t1", "Tolstoy: A Life"),
                ],
            )
            .await;
        catalog
            .set_page(
                &QueryTerm::Keyword("Tolstoy".into()),
                40,
                vec![fixtures::catalog_item("k1", "Russian Novels")],
            )
            .await;

        let results = service(&catalog).search("Tolstoy").await.unwrap();

        assert_eq!(catalog.query_count().await, 6);
        assert_eq!(
            ids(&results, |c| c.catalog_id.as_str()),
            vec!["t1", "a1", "k1"]
        );
    }

    #[tokio::test]
    async fn test_search_survives_failing_author_queries() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog
            .set_results(
                &QueryTerm::Title("Tolstoy".into()),
                vec![fixtures::catalog_item("t1", "Tolstoy")],
            )
            .await;
        catalog
            .set_results(
                &QueryTerm::Keyword("Tolstoy".into()),
                vec![
                    fixtures::catalog_item("k1", "Anna Karenina"),
                    fixtures::catalog_item("t1", "Tolstoy"),
                ],
            )
            .await;
        catalog.fail_term(&QueryTerm::Author("Tolstoy".into())).await;

        let results = service(&catalog).search("Tolstoy").await.unwrap();

        assert_eq!(ids(&results, |c| c.catalog_id.as_str()), vec!["t1", "k1"]);
    }

    #[tokio::test]
    async fn test_search_blank_term_issues_no_queries() {
        let catalog = Arc::new(MockExternalCatalog::new());
        let result = service(&catalog).search("  ").await;

        assert_eq!(result, Err(DiscoveryError::MissingQuery));
        assert_eq!(catalog.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_search_uses_page_size_without_language() {
        let catalog = Arc::new(MockExternalCatalog::new());
        service(&catalog).search("x").await.unwrap();

        for query in catalog.recorded_queries().await {
            assert_eq!(query.max_results, 40);
            assert!(query.lang_restrict.is_none());
        }
    }

    #[tokio::test]
    async fn test_recommend_excludes_and_caps() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog
            .set_results(
                &QueryTerm::Keyword("小説 日本".into()),
                ["5", "6", "9", "7"]
                    .iter()
                    .map(|id| fixtures::catalog_item(id, "Title"))
                    .collect(),
            )
            .await;
        let exclude: ExclusionSet = ["5", "9"].into_iter().collect();

        let books = service(&catalog)
            .recommend(&RankedFacets::default(), &exclude)
            .await;

        assert_eq!(ids(&books, |b| b.catalog_id.as_str()), vec!["6", "7"]);
    }

    #[tokio::test]
    async fn test_recommend_caps_merged_results() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog
            .set_results(
                &QueryTerm::Author("A".into()),
                (0..20)
                    .map(|i| fixtures::catalog_item(&format!("a{}", i), "T"))
                    .collect(),
            )
            .await;
        catalog
            .set_results(
                &QueryTerm::Genre("G".into()),
                (0..20)
                    .map(|i| fixtures::catalog_item(&format!("g{}", i), "T"))
                    .collect(),
            )
            .await;

        let facets = RankedFacets::preselected(vec!["A".into()], vec!["G".into()]);
        let books = service(&catalog).recommend(&facets, &ExclusionSet::new()).await;

        assert_eq!(books.len(), 12);
        assert!(books.iter().all(|b| b.catalog_id.starts_with('a')));
    }

    #[tokio::test]
    async fn test_recommend_requests_use_language_and_order() {
        let catalog = Arc::new(MockExternalCatalog::new());
        let facets = RankedFacets::preselected(vec!["A".into()], vec![]);
        service(&catalog).recommend(&facets, &ExclusionSet::new()).await;

        let recorded = catalog.recorded_queries().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].term, QueryTerm::Author("A".into()));
        assert_eq!(recorded[0].max_results, 20);
        assert_eq!(recorded[0].lang_restrict.as_deref(), Some("ja"));
        assert_eq!(recorded[0].order_by.as_deref(), Some("relevance"));
    }

    #[tokio::test]
    async fn test_recommend_all_failures_is_empty() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog.fail_all(true).await;

        let facets = RankedFacets::preselected(vec!["A".into()], vec!["G".into()]);
        let books = service(&catalog).recommend(&facets, &ExclusionSet::new()).await;

        assert!(books.is_empty());
        assert_eq!(catalog.query_count().await, 2);
    }

    #[tokio::test]
    async fn test_recommend_skips_placeholder_author() {
        let catalog = Arc::new(MockExternalCatalog::new());
        let facets = RankedFacets::preselected(vec!["著者不明".into()], vec![]);
        service(&catalog).recommend(&facets, &ExclusionSet::new()).await;

        let recorded = catalog.recorded_queries().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].term, QueryTerm::Keyword("小説 日本".into()));
    }

    #[tokio::test]
    async fn test_recommend_from_history_ranks_and_excludes_owned() {
        let catalog = Arc::new(MockExternalCatalog::new());
        catalog
            .set_results(
                &QueryTerm::Author("A".into()),
                vec![
                    fixtures::catalog_item("owned", "Already on shelf"),
                    fixtures::catalog_item("new", "New book"),
                ],
            )
            .await;

        let mut history = vec![
            fixtures::read_book("One", Some("A"), Some("G1")),
            fixtures::read_book("Two", Some("A"), Some("G1")),
            fixtures::read_book("Three", Some("B"), Some("G2")),
        ];
        history[0].catalog_id = Some("owned".into());
        let mut unread = fixtures::read_book("Four", Some("C"), None);
        unread.status = BookStatus::WantToRead;
        history.push(unread);

        let books = service(&catalog)
            .recommend_from_history(&history, ExclusionSet::new())
            .await;

        let rendered: Vec<String> = catalog
            .recorded_queries()
            .await
            .iter()
            .map(|q| q.term.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec!["inauthor:A", "inauthor:B", "subject:G1", "subject:G2"]
        );
        assert_eq!(ids(&books, |b| b.catalog_id.as_str()), vec!["new"]);
    }

    #[tokio::test]
    async fn test_recommend_from_history_placeholder_author_does_not_take_a_slot() {
        let catalog = Arc::new(MockExternalCatalog::new());
        let history: Vec<_> = ["著者不明", "著者不明", "著者不明", "A", "A", "B", "C"]
            .iter()
            .map(|author| fixtures::read_book("T", Some(author), None))
            .collect();

        service(&catalog)
            .recommend_from_history(&history, ExclusionSet::new())
            .await;

        let rendered: Vec<String> = catalog
            .recorded_queries()
            .await
            .iter()
            .map(|q| q.term.to_string())
            .collect();
        assert_eq!(rendered, vec!["inauthor:A", "inauthor:B", "inauthor:C"]);
    }

    #[tokio::test]
    async fn test_recommend_with_seeded_random_selector() {
        let catalog = Arc::new(MockExternalCatalog::new());
        let svc = service(&catalog).with_selector(Arc::new(RandomFacet::with_seed(11)));

        let facets = RankedFacets::preselected(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec!["G1".into(), "G2".into(), "G3".into()],
        );
        svc.recommend(&facets, &ExclusionSet::new()).await;

        let recorded = catalog.recorded_queries().await;
        assert_eq!(recorded.len(), 2);
        match (&recorded[0].term, &recorded[1].term) {
            (QueryTerm::Author(a), QueryTerm::Genre(g)) => {
                assert!(["A", "B", "C"].contains(&a.as_str()));
                assert!(["G1", "G2"].contains(&g.as_str()));
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }
}
