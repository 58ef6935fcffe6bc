//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Fetcher (per-object fetch outcomes, latency, retries)
//! - Ranker (objects surviving the window filter)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Fetcher Metrics
// =============================================================================

/// Object fetches total by result.
pub static FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("neowatch_fetches_total", "Total object fetches"),
        &["feed", "result"], // result: "success", "failure"
    )
    .unwrap()
});

/// Object fetch duration in seconds (including retries).
pub static FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "neowatch_fetch_duration_seconds",
            "Duration of single object fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["feed", "result"],
    )
    .unwrap()
});

/// Fetch retries total.
pub static FETCH_RETRIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("neowatch_fetch_retries_total", "Total fetch retry attempts").unwrap()
});

/// Fetches abandoned because the batch deadline fired.
pub static FETCHES_ABANDONED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "neowatch_fetches_abandoned_total",
        "Fetches not completed before the batch deadline",
    )
    .unwrap()
});

// =============================================================================
// Ranker Metrics
// =============================================================================

/// Objects with at least one approach inside the active window, per ranking.
pub static OBJECTS_IN_WINDOW: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "neowatch_objects_in_window",
            "Number of objects with approaches in the active window per ranking",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Fetcher
        Box::new(FETCHES_TOTAL.clone()),
        Box::new(FETCH_DURATION.clone()),
        Box::new(FETCH_RETRIES.clone()),
        Box::new(FETCHES_ABANDONED.clone()),
        // Ranker
        Box::new(OBJECTS_IN_WINDOW.clone()),
    ]
}
