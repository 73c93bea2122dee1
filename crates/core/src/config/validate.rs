use super::{types::Config, ConfigError};

/// Largest page the catalog API accepts.
const MAX_PAGE_SIZE: u32 = 40;

/// Most pages fetched per search variant.
const MAX_SEARCH_PAGES: u32 = 5;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Page sizes are within the catalog's 1..=40 range
/// - Search fetches between 1 and 5 pages, recommendations return at least one book
/// - At least one facet query is allowed
/// - Default query is not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let discovery = &config.discovery;

    for (name, size) in [
        ("discovery.search_page_size", discovery.search_page_size),
        ("discovery.recommend_page_size", discovery.recommend_page_size),
    ] {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_PAGE_SIZE, size
            )));
        }
    }

    if discovery.search_pages == 0 || discovery.search_pages > MAX_SEARCH_PAGES {
        return Err(ConfigError::ValidationError(format!(
            "discovery.search_pages must be between 1 and {}, got {}",
            MAX_SEARCH_PAGES, discovery.search_pages
        )));
    }

    if discovery.recommend_limit == 0 {
        return Err(ConfigError::ValidationError(
            "discovery.recommend_limit must be at least 1".to_string(),
        ));
    }

    if discovery.max_authors + discovery.max_genres == 0 {
        return Err(ConfigError::ValidationError(
            "discovery.max_authors and discovery.max_genres cannot both be 0".to_string(),
        ));
    }

    if discovery.default_query.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "discovery.default_query cannot be empty".to_string(),
        ));
    }

    Ok(())
}
