//! Types for the bibliographic catalog API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single volume returned by the catalog search API.
///
/// Only `id` is required. Everything under `volume_info` is optional and
/// left as `None` when the upstream payload omits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Catalog identity (unique per catalog).
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Descriptive metadata of a catalog volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    /// Human-facing page on the catalog site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

/// Cover image URLs at the resolutions the catalog offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}

/// A typed catalog query term.
///
/// `Display` renders the catalog's field-scoped search syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "value", rename_all = "snake_case")]
pub enum QueryTerm {
    /// Match against the title only.
    Title(String),
    /// Match against the author list only.
    Author(String),
    /// Match against the subject/category list only.
    Genre(String),
    /// Unscoped keyword search.
    Keyword(String),
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTerm::Title(v) => write!(f, "intitle:{}", v),
            QueryTerm::Author(v) => write!(f, "inauthor:{}", v),
            QueryTerm::Genre(v) => write!(f, "subject:{}", v),
            QueryTerm::Keyword(v) => write!(f, "{}", v),
        }
    }
}

/// One search request against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub term: QueryTerm,
    /// Pagination offset.
    pub start_index: u32,
    /// Result cap for this page.
    pub max_results: u32,
    /// Restrict results to a language (ISO 639-1), if set.
    pub lang_restrict: Option<String>,
    /// Upstream ordering hint ("relevance", "newest").
    pub order_by: Option<String>,
}

impl CatalogQuery {
    pub fn new(term: QueryTerm) -> Self {
        Self {
            term,
            start_index: 0,
            max_results: 40,
            lang_restrict: None,
            order_by: None,
        }
    }
}
