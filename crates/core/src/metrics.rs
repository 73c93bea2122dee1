//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog requests issued by the fan-out executor
//! - Discovery pipeline output (plan size, merged and returned counts)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// External Service Metrics
// =============================================================================

/// Catalog request duration.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shelfscout_catalog_request_duration_seconds",
            "Duration of catalog search requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["catalog"],
    )
    .unwrap()
});

/// Catalog requests total.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shelfscout_catalog_requests_total",
            "Total catalog search requests",
        ),
        &["catalog", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Discovery Metrics
// =============================================================================

/// Queries planned per discovery call.
pub static QUERIES_PLANNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shelfscout_queries_planned",
            "Number of catalog queries planned per discovery call",
        )
        .buckets(vec![1.0, 2.0, 3.0, 5.0, 6.0, 10.0]),
        &["mode"], // "search", "recommend"
    )
    .unwrap()
});

/// Books returned per discovery call.
pub static BOOKS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shelfscout_books_returned",
            "Number of books returned per discovery call",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 12.0, 25.0, 50.0, 100.0, 250.0]),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(QUERIES_PLANNED.clone()),
        Box::new(BOOKS_RETURNED.clone()),
    ]
}
