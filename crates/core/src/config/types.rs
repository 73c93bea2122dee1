use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Bibliographic catalog (Google Books) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// API root (default: https://www.googleapis.com/books/v1)
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    /// Server-held API key. Empty means unauthenticated (low quota).
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// How facets are picked from the ranked candidates on the recommendation path
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FacetSelection {
    /// Every ranked facet up to the cap, in rank order
    #[default]
    Top,
    /// One uniformly random facet among the first `cap` ranked ones
    Random,
}

/// Discovery engine tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Results per page for interactive search (catalog maximum is 40)
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Pages fetched per search variant
    #[serde(default = "default_search_pages")]
    pub search_pages: u32,
    /// Results per recommendation query
    #[serde(default = "default_recommend_page_size")]
    pub recommend_page_size: u32,
    /// Maximum recommendations returned
    #[serde(default = "default_recommend_limit")]
    pub recommend_limit: usize,
    /// Language restriction for recommendation queries
    #[serde(default = "default_recommend_lang")]
    pub recommend_lang: Option<String>,
    /// Upstream ordering for recommendation queries
    #[serde(default = "default_order_by")]
    pub order_by: Option<String>,
    #[serde(default = "default_max_authors")]
    pub max_authors: usize,
    #[serde(default = "default_max_genres")]
    pub max_genres: usize,
    /// Keyword query used when no facet is available
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Placeholder for books without an author list
    #[serde(default = "default_unknown_author")]
    pub unknown_author: String,
    #[serde(default)]
    pub facet_selection: FacetSelection,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_page_size: default_search_page_size(),
            search_pages: default_search_pages(),
            recommend_page_size: default_recommend_page_size(),
            recommend_limit: default_recommend_limit(),
            recommend_lang: default_recommend_lang(),
            order_by: default_order_by(),
            max_authors: default_max_authors(),
            max_genres: default_max_genres(),
            default_query: default_query(),
            unknown_author: default_unknown_author(),
            facet_selection: FacetSelection::default(),
        }
    }
}

fn default_search_page_size() -> u32 {
    40
}

fn default_search_pages() -> u32 {
    2
}

fn default_recommend_page_size() -> u32 {
    20
}

fn default_recommend_limit() -> usize {
    12
}

fn default_recommend_lang() -> Option<String> {
    Some("ja".to_string())
}

fn default_order_by() -> Option<String> {
    Some("relevance".to_string())
}

fn default_max_authors() -> usize {
    3
}

fn default_max_genres() -> usize {
    2
}

fn default_query() -> String {
    "小説 日本".to_string()
}

fn default_unknown_author() -> String {
    "著者不明".to_string()
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub catalog: SanitizedCatalogConfig,
    pub discovery: DiscoveryConfig,
}

/// Sanitized catalog config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                api_key_configured: !config.catalog.api_key.is_empty(),
                timeout_secs: config.catalog.timeout_secs,
            },
            discovery: config.discovery.clone(),
        }
    }
}
