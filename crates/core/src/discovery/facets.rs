//! Frequency ranking of book attributes (authors, genres).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{BookStatus, ReadBook};

/// Attribute of a book used to build personalized queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Author,
    Genre,
}

impl FacetKind {
    /// Trimmed attribute value, `None` when missing or blank.
    fn value_of<'a>(&self, book: &'a ReadBook) -> Option<&'a str> {
        let raw = match self {
            FacetKind::Author => book.author.as_deref(),
            FacetKind::Genre => book.genre.as_deref(),
        };
        raw.map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Occurrence count of one attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Count attribute values across `books`, most frequent first.
///
/// Ties keep first-seen order (the sort is stable).
pub fn facet_counts<'a, I>(books: I, kind: FacetKind) -> Vec<FacetCount>
where
    I: IntoIterator<Item = &'a ReadBook>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<FacetCount> = Vec::new();

    for book in books {
        let Some(value) = kind.value_of(book) else {
            continue;
        };
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(FacetCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `limit` most frequent distinct values of `kind`.
pub fn top_facets<'a, I>(books: I, kind: FacetKind, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReadBook>,
{
    facet_counts(books, kind)
        .into_iter()
        .take(limit)
        .map(|c| c.value)
        .collect()
}

/// Ranked facet candidates handed to the query planner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedFacets {
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl RankedFacets {
    /// Facets supplied directly by the caller, used in the given order.
    pub fn preselected(authors: Vec<String>, genres: Vec<String>) -> Self {
        Self { authors, genres }
    }

    /// Rank the finished books of a reading history.
    ///
    /// Every distinct value is kept in rank order; the planner applies the
    /// caps after unusable values have been dropped.
    pub fn from_history(history: &[ReadBook]) -> Self {
        let finished = || history.iter().filter(|b| b.status == BookStatus::Read);
        let ranked = |kind: FacetKind| -> Vec<String> {
            facet_counts(finished(), kind)
                .into_iter()
                .map(|c| c.value)
                .collect()
        };

        Self {
            authors: ranked(FacetKind::Author),
            genres: ranked(FacetKind::Genre),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.genres.is_empty()
    }
}
