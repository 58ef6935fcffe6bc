//! Mock near-earth object feed for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::feed::{FeedError, NeoFeed, TrackedObject};

/// A failure the mock feed can be told to produce for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    NotFound,
    Unauthorized,
    RateLimited,
    ServerError(u16),
    Malformed,
}

impl MockFailure {
    fn to_error(self, id: &str) -> FeedError {
        match self {
            MockFailure::NotFound => FeedError::NotFound(id.to_string()),
            MockFailure::Unauthorized => {
                FeedError::Unauthorized("mock rejected the API key".to_string())
            }
            MockFailure::RateLimited => FeedError::RateLimitExceeded,
            MockFailure::ServerError(status) => FeedError::ApiError {
                status,
                message: "mock server error".to_string(),
            },
            MockFailure::Malformed => {
                FeedError::ParseError(format!("mock malformed body for {}", id))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FailureRule {
    failure: MockFailure,
    /// Remaining failures before the id starts succeeding; `None` fails forever.
    remaining: Option<u32>,
}

/// Mock implementation of the NeoFeed trait.
///
/// Provides controllable behavior for testing:
/// - Return configured objects by id (unknown ids are `NotFound`)
/// - Inject permanent or temporary failures per id
/// - Delay responses to exercise concurrency and deadlines
/// - Track requests and the peak number of concurrent requests
///
/// # Example
///
/// ```rust,ignore
/// use neowatch_core::testing::{fixtures, MockFailure, MockNeoFeed};
///
/// let feed = MockNeoFeed::new();
/// feed.add_object(fixtures::tracked_object("1", &[(today, 50_000.0)])).await;
/// feed.fail_always("2", MockFailure::ServerError(503)).await;
///
/// let object = feed.fetch_object("1").await?;
/// ```
#[derive(Debug, Default)]
pub struct MockNeoFeed {
    name: Option<String>,
    objects: Arc<RwLock<HashMap<String, TrackedObject>>>,
    failures: Arc<RwLock<HashMap<String, FailureRule>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    default_delay: Arc<RwLock<Option<Duration>>>,
    requests: Arc<RwLock<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockNeoFeed {
    /// Create a new empty mock feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mock feed reporting `name` (used as the metrics label).
    pub fn with_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Add an object, keyed by its id.
    pub async fn add_object(&self, object: TrackedObject) {
        self.objects.write().await.insert(object.id.clone(), object);
    }

    /// Replace all objects.
    pub async fn set_objects(&self, objects: Vec<TrackedObject>) {
        let mut map = self.objects.write().await;
        map.clear();
        for object in objects {
            map.insert(object.id.clone(), object);
        }
    }

    // =========================================================================
    // Failure Injection
    // =========================================================================

    /// Make every request for `id` fail.
    pub async fn fail_always(&self, id: &str, failure: MockFailure) {
        self.failures.write().await.insert(
            id.to_string(),
            FailureRule {
                failure,
                remaining: None,
            },
        );
    }

    /// Make the next `times` requests for `id` fail, then behave normally.
    pub async fn fail_times(&self, id: &str, failure: MockFailure, times: u32) {
        self.failures.write().await.insert(
            id.to_string(),
            FailureRule {
                failure,
                remaining: Some(times),
            },
        );
    }

    async fn take_failure(&self, id: &str) -> Option<MockFailure> {
        let mut failures = self.failures.write().await;
        let rule = failures.get_mut(id)?;
        match rule.remaining {
            None => Some(rule.failure),
            Some(0) => {
                failures.remove(id);
                None
            }
            Some(n) => {
                rule.remaining = Some(n - 1);
                Some(rule.failure)
            }
        }
    }

    // =========================================================================
    // Latency
    // =========================================================================

    /// Delay every response by `delay`.
    pub async fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.write().await = Some(delay);
    }

    /// Delay responses for a single id.
    pub async fn set_delay(&self, id: &str, delay: Duration) {
        self.delays.write().await.insert(id.to_string(), delay);
    }

    async fn delay_for(&self, id: &str) -> Option<Duration> {
        match self.delays.read().await.get(id) {
            Some(delay) => Some(*delay),
            None => *self.default_delay.read().await,
        }
    }

    // =========================================================================
    // Request Recording
    // =========================================================================

    /// All requested ids, in request order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    /// Number of requests for a given id.
    pub async fn request_count(&self, id: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.as_str() == id)
            .count()
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter even when the request future is dropped.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NeoFeed for MockNeoFeed {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("mock")
    }

    async fn fetch_object(&self, id: &str) -> Result<TrackedObject, FeedError> {
        self.requests.write().await.push(id.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        if let Some(delay) = self.delay_for(id).await {
            tokio::time::sleep(delay).await;
        }

        if let Some(failure) = self.take_failure(id).await {
            return Err(failure.to_error(id));
        }

        self.objects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| FeedError::NotFound(id.to_string()))
    }
}
