//! Book discovery API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shelfscout_core::{
    DiscoveryError, ExclusionSet, RankedFacets, ReadBook, RecommendedBook, SearchCandidate,
};
use tracing::debug;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Recommendation parameters after folding repeated and comma separated
/// values together.
#[derive(Debug, Default, PartialEq)]
pub struct RecommendParams {
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub exclude: Vec<String>,
}

impl RecommendParams {
    /// Parse raw query pairs.
    ///
    /// `authors`, `genres` and `exclude` may repeat and may hold comma
    /// separated lists. A single `author` is ranked ahead of `authors`.
    /// Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut single_authors = Vec::new();
        let mut params = Self::default();

        for (key, value) in pairs {
            let target = match key.as_str() {
                "author" => {
                    let value = value.trim();
                    if !value.is_empty() {
                        single_authors.push(value.to_string());
                    }
                    continue;
                }
                "authors" => &mut params.authors,
                "genres" => &mut params.genres,
                "exclude" => &mut params.exclude,
                _ => continue,
            };
            target.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from),
            );
        }

        single_authors.append(&mut params.authors);
        params.authors = single_authors;
        params
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryRecommendRequest {
    #[serde(default)]
    pub history: Vec<ReadBook>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/books/search?q=<term>
///
/// Fan out title, author and keyword scoped queries for one term.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchCandidate>>, (StatusCode, Json<ErrorResponse>)> {
    let term = params.q.unwrap_or_default();

    state.discovery().search(&term).await.map(Json).map_err(|e| {
        let status = match e {
            DiscoveryError::MissingQuery => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}

/// GET /api/v1/books/recommendations
///
/// Recommendations from facets the caller already ranked.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<RecommendedBook>> {
    let params = RecommendParams::from_pairs(pairs);
    debug!(
        authors = ?params.authors,
        genres = ?params.genres,
        exclude = params.exclude.len(),
        "Recommendation request"
    );

    let facets = RankedFacets::preselected(params.authors, params.genres);
    let exclude: ExclusionSet = params.exclude.into_iter().collect();

    Json(state.discovery().recommend(&facets, &exclude).await)
}

/// POST /api/v1/books/recommendations
///
/// Recommendations ranked from a reading history.
pub async fn recommend_from_history(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HistoryRecommendRequest>,
) -> Json<Vec<RecommendedBook>> {
    debug!(
        history = body.history.len(),
        exclude = body.exclude.len(),
        "History recommendation request"
    );

    let exclude: ExclusionSet = body.exclude.into_iter().collect();
    Json(
        state
            .discovery()
            .recommend_from_history(&body.history, exclude)
            .await,
    )
}
