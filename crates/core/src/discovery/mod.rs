//! Book discovery engine.
//!
//! Turns a free-text term or a reading history into a deduplicated,
//! prioritized, capped list of books by fanning out several catalog
//! queries and merging what comes back:
//!
//! planner -> fan-out -> merge -> normalizer
//!
//! The facet extractor feeds the planner on the recommendation path.

mod facets;
mod fanout;
mod merge;
mod normalize;
mod planner;
mod service;
mod types;

pub use facets::{facet_counts, top_facets, FacetCount, FacetKind, RankedFacets};
pub use fanout::{fan_out, FanOutOptions};
pub use merge::merge_unique;
pub use normalize::{secure_url, Normalizer};
pub use planner::{
    plan_recommendations, plan_search, FacetLimits, FacetSelector, PlannedQuery, QueryPlan,
    RandomFacet, SearchPaging, TopFacets,
};
pub use service::DiscoveryService;
pub use types::*;
