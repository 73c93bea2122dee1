//! Mapping of raw catalog items into display-ready books.

use crate::external_catalog::{CatalogItem, VolumeInfo};

use super::types::{ExclusionSet, RecommendedBook, SearchCandidate};

/// Public volume page used when the catalog gives no info link.
const INFO_LINK_BASE: &str = "https://books.google.com/books?id=";

/// Rewrite an `http://` URL to `https://`. Other URLs are returned as-is.
pub fn secure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Field fallback rules shared by every output shape.
#[derive(Debug, Clone)]
pub struct Normalizer {
    unknown_author: String,
}

impl Normalizer {
    pub fn new(unknown_author: impl Into<String>) -> Self {
        Self {
            unknown_author: unknown_author.into(),
        }
    }

    /// Title, or `None` when the item must be dropped.
    fn title(info: &VolumeInfo) -> Option<String> {
        non_blank(&info.title).map(|t| t.trim().to_string())
    }

    /// Authors joined with ", ", falling back to the placeholder.
    fn author(&self, info: &VolumeInfo) -> String {
        info.authors
            .as_ref()
            .map(|authors| {
                authors
                    .iter()
                    .map(|a| a.trim())
                    .filter(|a| !a.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| self.unknown_author.clone())
    }

    /// Larger thumbnail, then the small one, upgraded to https.
    fn cover_url(info: &VolumeInfo) -> Option<String> {
        info.image_links.as_ref().and_then(|links| {
            non_blank(&links.thumbnail)
                .or_else(|| non_blank(&links.small_thumbnail))
                .map(secure_url)
        })
    }

    fn info_url(item: &CatalogItem) -> String {
        non_blank(&item.volume_info.info_link)
            .map(String::from)
            .unwrap_or_else(|| format!("{}{}", INFO_LINK_BASE, item.id))
    }

    pub fn search_candidate(&self, item: &CatalogItem) -> Option<SearchCandidate> {
        let info = &item.volume_info;
        Some(SearchCandidate {
            catalog_id: item.id.clone(),
            title: Self::title(info)?,
            author: self.author(info),
            cover_image_url: Self::cover_url(info),
            genre: info
                .categories
                .as_ref()
                .and_then(|c| c.first())
                .cloned(),
            total_pages: info.page_count,
        })
    }

    pub fn recommended_book(&self, item: &CatalogItem) -> Option<RecommendedBook> {
        let info = &item.volume_info;
        Some(RecommendedBook {
            catalog_id: item.id.clone(),
            title: Self::title(info)?,
            author: self.author(info),
            cover_image_url: Self::cover_url(info),
            info_url: Self::info_url(item),
        })
    }

    /// Search results: title filter only, no exclusion, no cap.
    pub fn search_candidates(&self, items: &[CatalogItem]) -> Vec<SearchCandidate> {
        items
            .iter()
            .filter_map(|item| self.search_candidate(item))
            .collect()
    }

    /// Recommendations: title filter, exclusion, then truncation to `limit`.
    pub fn recommendations(
        &self,
        items: &[CatalogItem],
        exclude: &ExclusionSet,
        limit: usize,
    ) -> Vec<RecommendedBook> {
        items
            .iter()
            .filter(|item| !exclude.contains(&item.id))
            .filter_map(|item| self.recommended_book(item))
            .take(limit)
            .collect()
    }
}
