//! Common test utilities for API testing with a mock catalog.
//!
//! This module provides a test fixture that creates an in-process router
//! backed by `MockExternalCatalog`, so the HTTP layer can be exercised
//! without reaching the real Books API.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use shelfscout_core::{testing::MockExternalCatalog, Config, DiscoveryConfig, DiscoveryService};
use shelfscout_server::state::AppState;

/// Re-export fixtures for test convenience
pub use shelfscout_core::testing::fixtures;

/// Test fixture with a controllable catalog.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.catalog.set_results(&QueryTerm::Title("x".into()), vec![...]).await;
///
///     let response = fixture.get("/api/v1/books/search?q=x").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure pages, inject failures, inspect queries
    pub catalog: Arc<MockExternalCatalog>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let catalog = Arc::new(MockExternalCatalog::new());
        let state = Arc::new(AppState::new(config, catalog.clone()));
        Self::from_state(state, catalog)
    }

    /// Create a fixture around a prepared discovery service (custom facet
    /// selectors).
    pub fn with_discovery(
        config: Config,
        build: impl FnOnce(Arc<MockExternalCatalog>, DiscoveryConfig) -> DiscoveryService,
    ) -> Self {
        let catalog = Arc::new(MockExternalCatalog::new());
        let discovery = build(catalog.clone(), config.discovery.clone());
        let state = Arc::new(AppState::with_discovery(config, discovery));
        Self::from_state(state, catalog)
    }

    fn from_state(state: Arc<AppState>, catalog: Arc<MockExternalCatalog>) -> Self {
        Self {
            router: shelfscout_server::api::create_router(state),
            catalog,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a GET request and return the raw text body (for /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Catalog ids of a JSON array response, in order.
pub fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|book| book["catalog_id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
