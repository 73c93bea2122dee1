//! Query planning for interactive search and recommendations.
//!
//! Interactive search scopes one user term three ways (title, author,
//! keyword) and pages each variant. Recommendations turn ranked facets into
//! author- and genre-scoped queries. Both produce a [`QueryPlan`] whose
//! order is the merge priority.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Mutex;

use crate::external_catalog::QueryTerm;

use super::facets::RankedFacets;
use super::types::DiscoveryError;

/// One catalog request in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub term: QueryTerm,
    pub start_index: u32,
}

/// Ordered, duplicate-free list of catalog requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    queries: Vec<PlannedQuery>,
    seen: HashSet<(String, u32)>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query unless an identical one (same rendered query string
    /// and offset) is already planned. Returns whether it was added.
    pub fn push(&mut self, term: QueryTerm, start_index: u32) -> bool {
        if !self.seen.insert((term.to_string(), start_index)) {
            return false;
        }
        self.queries.push(PlannedQuery { term, start_index });
        true
    }

    pub fn queries(&self) -> &[PlannedQuery] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Rendered query strings in plan order.
    pub fn rendered(&self) -> Vec<String> {
        self.queries.iter().map(|q| q.term.to_string()).collect()
    }
}

/// Paging of the literal-query plan.
#[derive(Debug, Clone, Copy)]
pub struct SearchPaging {
    /// Offset step between pages.
    pub page_size: u32,
    /// Pages requested per variant.
    pub pages: u32,
}

/// Plan an interactive search for `term`.
///
/// Variants in priority order: title, author, keyword. Each is requested at
/// offsets `0, page_size, ..` for `pages` pages.
pub fn plan_search(term: &str, paging: SearchPaging) -> Result<QueryPlan, DiscoveryError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(DiscoveryError::MissingQuery);
    }

    let variants = [
        QueryTerm::Title(term.to_string()),
        QueryTerm::Author(term.to_string()),
        QueryTerm::Keyword(term.to_string()),
    ];

    let mut plan = QueryPlan::new();
    for variant in variants {
        for page in 0..paging.pages {
            plan.push(variant.clone(), page.saturating_mul(paging.page_size));
        }
    }
    Ok(plan)
}

/// Caps on the number of facets turned into queries.
#[derive(Debug, Clone, Copy)]
pub struct FacetLimits {
    pub max_authors: usize,
    pub max_genres: usize,
}

/// Picks which ranked facets become queries.
///
/// `ranked` is already cleaned (trimmed, non-blank, distinct) and in rank
/// order. Implementations must only return values from the first `cap`
/// entries.
pub trait FacetSelector: Send + Sync {
    /// Name of this selector for logging.
    fn name(&self) -> &str;

    fn select(&self, ranked: &[String], cap: usize) -> Vec<String>;
}

/// Every ranked facet up to the cap, in rank order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopFacets;

impl FacetSelector for TopFacets {
    fn name(&self) -> &str {
        "top"
    }

    fn select(&self, ranked: &[String], cap: usize) -> Vec<String> {
        ranked.iter().take(cap).cloned().collect()
    }
}

/// A single facet drawn uniformly from the first `cap` ranked ones, so
/// repeated calls surface different books.
pub struct RandomFacet {
    rng: Mutex<StdRng>,
}

impl RandomFacet {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible selection for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomFacet {
    fn default() -> Self {
        Self::new()
    }
}

impl FacetSelector for RandomFacet {
    fn name(&self) -> &str {
        "random"
    }

    fn select(&self, ranked: &[String], cap: usize) -> Vec<String> {
        let pool = ranked.len().min(cap);
        if pool == 0 {
            return Vec::new();
        }
        let index = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            rng.gen_range(0..pool)
        };
        vec![ranked[index].clone()]
    }
}

/// Trim, drop blanks and duplicates, keep order.
fn clean_facets(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(String::from)
        .collect()
}

/// Plan recommendation queries from ranked facets.
///
/// Author queries come first, in selection order, then genre queries. When
/// no facet survives, the plan is the single `default_query` keyword query,
/// so at least one request is always issued.
pub fn plan_recommendations(
    facets: &RankedFacets,
    selector: &dyn FacetSelector,
    limits: FacetLimits,
    default_query: &str,
) -> QueryPlan {
    let authors = selector.select(&clean_facets(&facets.authors), limits.max_authors);
    let genres = selector.select(&clean_facets(&facets.genres), limits.max_genres);

    let mut plan = QueryPlan::new();
    for author in authors {
        plan.push(QueryTerm::Author(author), 0);
    }
    for genre in genres {
        plan.push(QueryTerm::Genre(genre), 0);
    }

    if plan.is_empty() {
        plan.push(QueryTerm::Keyword(default_query.trim().to_string()), 0);
    }
    plan
}
