//! Types for the fetcher.

use serde::{Deserialize, Serialize};

use crate::feed::{FeedError, TrackedObject};

/// Configuration for batch fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Maximum number of requests in flight at once.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Batch deadline (seconds). When it fires, no new fetches are started
    /// and in-flight ones are abandoned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,

    /// Retries per object for transient errors (0 = no retry).
    #[serde(default)]
    pub max_retries: u32,

    /// Delay between retries (milliseconds).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_max_concurrent_fetches() -> usize {
    10
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            deadline_secs: None,
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// A fetch that did not produce an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchFailure {
    /// Identifier that was requested.
    pub id: String,
    /// Error description.
    pub error: String,
    /// Whether the error was transient (retrying later may succeed).
    pub transient: bool,
}

/// Outcome of a batch fetch.
///
/// `attempted == succeeded + failures.len() + not_completed` always holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchReport {
    /// Successfully fetched objects, in completion order.
    pub objects: Vec<TrackedObject>,
    /// Number of identifiers requested.
    pub attempted: usize,
    /// Number of identifiers fetched successfully.
    pub succeeded: usize,
    /// Identifiers that failed.
    pub failures: Vec<FetchFailure>,
    /// Identifiers abandoned because the batch was stopped early.
    pub not_completed: usize,
}

impl FetchReport {
    pub(crate) fn new(attempted: usize) -> Self {
        Self {
            attempted,
            ..Self::default()
        }
    }

    pub(crate) fn record_success(&mut self, object: TrackedObject) {
        self.succeeded += 1;
        self.objects.push(object);
    }

    pub(crate) fn record_failure(&mut self, id: &str, error: &FeedError) {
        self.failures.push(FetchFailure {
            id: id.to_string(),
            error: error.to_string(),
            transient: error.is_transient(),
        });
    }

    /// Number of fetches that finished, successfully or not.
    pub fn completed(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    /// Number of failed fetches.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when every requested identifier was fetched successfully.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.attempted
    }

    /// True when identifiers were requested and none was fetched.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}
