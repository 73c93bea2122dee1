pub mod config;
pub mod discovery;
pub mod external_catalog;
pub mod metrics;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    DiscoveryConfig, FacetSelection, SanitizedConfig, ServerConfig,
};
pub use discovery::{
    BookStatus, DiscoveryError, DiscoveryService, ExclusionSet, RankedFacets, ReadBook,
    RecommendedBook, SearchCandidate,
};
pub use external_catalog::{
    CatalogItem, CatalogQuery, ExternalCatalog, ExternalCatalogError, GoogleBooksClient,
    QueryTerm,
};
