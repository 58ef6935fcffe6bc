//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock feed injected, enabling E2E testing of the HTTP surface
//! without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Local, NaiveDate};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use neowatch_core::{
    testing::MockNeoFeed, ApproachDetector, ApproachFetcher, ApproachRanker, Config, NeoFeed,
};

/// Re-export fixtures for test convenience
pub use neowatch_core::testing::fixtures;

/// Test fixture for E2E testing with a mock feed.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_closest() {
///     let fixture = TestFixture::new().await;
///     fixture.feed.add_object(fixtures::tracked_object("1", &[(today, 1.0)])).await;
///
///     let response = fixture.get("/api/v1/approaches/closest?ids=1").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock feed - configure objects and failures
    pub feed: Arc<MockNeoFeed>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with the default configuration.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let feed = Arc::new(MockNeoFeed::new());

        let mut config = Config::with_api_key("test-secret-key");
        config.watchlist.ids = test_config.watchlist;
        config.ranking.default_limit = test_config.default_limit;
        config.ranking.max_limit = test_config.max_limit;

        let dyn_feed: Arc<dyn NeoFeed> = Arc::clone(&feed) as Arc<dyn NeoFeed>;
        let detector = ApproachDetector::new(
            ApproachFetcher::new(Arc::clone(&dyn_feed), config.fetcher.clone()),
            ApproachRanker::new(config.ranking.clone()),
        );

        let state = Arc::new(neowatch_server::state::AppState::new(
            config, dyn_feed, detector,
        ));

        let router = neowatch_server::api::create_router(state);

        Self { router, feed }
    }

    /// Send a GET request and parse the body as JSON.
    pub async fn get(&self, path: &str) -> TestResponse {
        let (status, bytes) = self.send_get(path).await;

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Send a GET request and return the body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let (status, bytes) = self.send_get(path).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send_get(&self, path: &str) -> (StatusCode, Vec<u8>) {
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

        (status, body_bytes.to_vec())
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Ids used when a request does not name any
    pub watchlist: Vec<String>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            watchlist: Vec::new(),
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl TestConfig {
    /// Create config with a watchlist.
    pub fn with_watchlist(ids: &[&str]) -> Self {
        Self {
            watchlist: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// Today, as the server sees it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
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
