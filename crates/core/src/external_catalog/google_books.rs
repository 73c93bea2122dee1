//! Google Books volumes API client.
//!
//! The API key is optional: without one the API still answers, with a
//! lower quota.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::CatalogConfig;

use super::types::{CatalogItem, CatalogQuery};
use super::{ExternalCatalog, ExternalCatalogError};

/// Google Books API client.
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleBooksClient {
    /// Create a new Google Books client.
    pub fn new(config: &CatalogConfig) -> Result<Self, ExternalCatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn query_params(&self, query: &CatalogQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.term.to_string()),
            ("maxResults", query.max_results.to_string()),
            ("startIndex", query.start_index.to_string()),
        ];
        if let Some(lang) = &query.lang_restrict {
            params.push(("langRestrict", lang.clone()));
        }
        if let Some(order_by) = &query.order_by {
            params.push(("orderBy", order_by.clone()));
        }
        if !self.api_key.is_empty() {
            params.push(("key", self.api_key.clone()));
        }
        params
    }
}

#[async_trait::async_trait]
impl ExternalCatalog for GoogleBooksClient {
    fn name(&self) -> &str {
        "google_books"
    }

    async fn search_volumes(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<CatalogItem>, ExternalCatalogError> {
        let url = format!("{}/volumes", self.base_url);

        debug!(
            q = %query.term,
            start_index = query.start_index,
            "Google Books volume search"
        );

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(ExternalCatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalCatalogError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let volumes: VolumesResponse = response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse volumes response: {}", e))
        })?;

        debug!(
            q = %query.term,
            items = volumes.items.len(),
            "Google Books volume search complete"
        );

        Ok(volumes.items)
    }
}

// ============================================================================
// Google Books API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<CatalogItem>,
}
