//! External bibliographic catalog integration.
//!
//! This module provides the client used by the discovery engine to query
//! the Google Books volumes API, plus the trait that lets tests swap in a
//! mock catalog.

mod google_books;
mod types;

pub use google_books::GoogleBooksClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the catalog.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for bibliographic catalog clients.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Short backend name used in logs and metrics.
    fn name(&self) -> &str;

    /// Run a single search request and return the raw volumes.
    ///
    /// An upstream response with no `items` is an empty list, not an error.
    async fn search_volumes(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogItem>, ExternalCatalogError>;
}
