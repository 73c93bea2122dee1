//! Types shared by the discovery pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors surfaced by the discovery service.
///
/// Upstream catalog failures never show up here: they degrade to empty
/// contributions inside the fan-out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Interactive search was called without a usable term.
    #[error("query required")]
    MissingQuery,
}

/// Shelf status of a book in the user's history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    WantToRead,
    Reading,
    #[default]
    Read,
}

/// A book from the user's reading history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    /// Catalog identity when the book was added from a search result.
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub status: BookStatus,
}

/// A search result ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCandidate {
    pub catalog_id: String,
    pub title: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub genre: Option<String>,
    pub total_pages: Option<u32>,
}

/// A recommended book ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedBook {
    pub catalog_id: String,
    pub title: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub info_url: String,
}

/// Catalog identities that must never be returned (already owned or
/// already shown). Membership is an exact string match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity. Blank identities are ignored.
    pub fn insert(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !id.trim().is_empty() {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}
