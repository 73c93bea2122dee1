use std::sync::Arc;
use shelfscout_core::{Config, DiscoveryService, ExternalCatalog, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    discovery: DiscoveryService,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn ExternalCatalog>) -> Self {
        let discovery = DiscoveryService::new(catalog, config.discovery.clone());
        Self { config, discovery }
    }

    /// Build state around an already configured discovery service.
    pub fn with_discovery(config: Config, discovery: DiscoveryService) -> Self {
        Self { config, discovery }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn discovery(&self) -> &DiscoveryService {
        &self.discovery
    }
}
