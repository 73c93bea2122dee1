//! Testing utilities and mock implementations.
//!
//! The mock catalog lets the discovery pipeline and the HTTP layer be
//! exercised end to end without reaching the real Books API.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfscout_core::testing::{MockExternalCatalog, fixtures};
//!
//! let catalog = Arc::new(MockExternalCatalog::new());
//! catalog.set_results(&QueryTerm::Author("A".into()), vec![fixtures::catalog_item("1", "One")]).await;
//!
//! let service = DiscoveryService::new(catalog.clone(), DiscoveryConfig::default());
//! ```

mod mock_external_catalog;

pub use mock_external_catalog::MockExternalCatalog;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::discovery::{BookStatus, ReadBook};
    use crate::external_catalog::{CatalogItem, ImageLinks, VolumeInfo};

    /// Create a catalog item with a title and nothing else.
    pub fn catalog_item(id: &str, title: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            volume_info: VolumeInfo {
                title: Some(title.to_string()),
                ..Default::default()
            },
        }
    }

    /// Create a fully populated catalog item.
    pub fn full_catalog_item(id: &str, title: &str, authors: &[&str], genre: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            volume_info: VolumeInfo {
                title: Some(title.to_string()),
                authors: Some(authors.iter().map(|a| a.to_string()).collect()),
                image_links: Some(ImageLinks {
                    thumbnail: Some(format!("http://books.google.com/content?id={}&zoom=1", id)),
                    small_thumbnail: Some(format!(
                        "http://books.google.com/content?id={}&zoom=5",
                        id
                    )),
                }),
                info_link: Some(format!("https://books.google.com/books?id={}", id)),
                categories: Some(vec![genre.to_string()]),
                page_count: Some(240),
            },
        }
    }

    /// Create a finished book in a reading history.
    pub fn read_book(title: &str, author: Option<&str>, genre: Option<&str>) -> ReadBook {
        ReadBook {
            title: title.to_string(),
            author: author.map(String::from),
            genre: genre.map(String::from),
            catalog_id: None,
            status: BookStatus::Read,
        }
    }
}
