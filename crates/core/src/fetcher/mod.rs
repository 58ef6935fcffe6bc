//! Batch fetching of near-earth object records.
//!
//! `ApproachFetcher` fans out one request per identifier with a bounded
//! number in flight. A failed fetch is logged and recorded in the
//! `FetchReport` but never aborts the rest of the batch.

mod types;

pub use types::{FetchFailure, FetchReport, FetcherConfig};

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::FutureExt;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::feed::{FeedError, NeoFeed, TrackedObject};
use crate::metrics::{FETCHES_ABANDONED, FETCHES_TOTAL, FETCH_DURATION, FETCH_RETRIES};

/// Fetches approach records for a set of identifiers.
pub struct ApproachFetcher {
    feed: Arc<dyn NeoFeed>,
    config: FetcherConfig,
}

impl ApproachFetcher {
    /// Create a new fetcher over the given feed.
    pub fn new(feed: Arc<dyn NeoFeed>, config: FetcherConfig) -> Self {
        Self { feed, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch every identifier, honouring the configured deadline.
    ///
    /// Returns once all fetches have completed or the deadline fired.
    pub async fn fetch_all(&self, ids: &[String]) -> FetchReport {
        match self.config.deadline_secs {
            Some(secs) => {
                self.fetch_all_until(ids, tokio::time::sleep(Duration::from_secs(secs)))
                    .await
            }
            None => self.fetch_all_until(ids, std::future::pending::<()>()).await,
        }
    }

    /// Fetch every identifier until `stop` resolves.
    ///
    /// When `stop` resolves first, no further fetches are started, in-flight
    /// fetches are dropped and the remainder is counted in
    /// `FetchReport::not_completed`.
    pub async fn fetch_all_until<F>(&self, ids: &[String], stop: F) -> FetchReport
    where
        F: Future<Output = ()>,
    {
        let mut report = FetchReport::new(ids.len());
        if ids.is_empty() {
            return report;
        }

        let concurrency = self.config.max_concurrent_fetches.max(1);
        let start = Instant::now();

        debug!(
            count = ids.len(),
            concurrency = concurrency,
            feed = self.feed.name(),
            "Fetching objects"
        );

        let fetches: Vec<_> = ids
            .iter()
            .map(|id| {
                async move {
                    let result = self.fetch_one(id).await;
                    (id, result)
                }
                .boxed()
            })
            .collect();
        let mut results = stream::iter(fetches).buffer_unordered(concurrency);

        tokio::pin!(stop);

        loop {
            tokio::select! {
                // Collect finished fetches before honouring the stop signal.
                biased;

                next = results.next() => match next {
                    Some((_, Ok(object))) => report.record_success(object),
                    Some((id, Err(e))) => {
                        warn!(id = %id, error = %e, "Failed to fetch object");
                        report.record_failure(id, &e);
                    }
                    None => break,
                },
                _ = &mut stop => {
                    report.not_completed = report.attempted - report.completed();
                    FETCHES_ABANDONED.inc_by(report.not_completed as u64);
                    warn!(
                        completed = report.completed(),
                        not_completed = report.not_completed,
                        "Fetch batch stopped before completion"
                    );
                    break;
                }
            }
        }

        info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed(),
            not_completed = report.not_completed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetch batch finished"
        );

        report
    }

    /// Fetch one identifier, retrying transient errors.
    async fn fetch_one(&self, id: &str) -> Result<TrackedObject, FeedError> {
        let start = Instant::now();

        let result = if id.trim().is_empty() {
            Err(FeedError::InvalidId(id.to_string()))
        } else {
            self.fetch_with_retry(id).await
        };

        let outcome = if result.is_ok() { "success" } else { "failure" };
        FETCHES_TOTAL
            .with_label_values(&[self.feed.name(), outcome])
            .inc();
        FETCH_DURATION
            .with_label_values(&[self.feed.name(), outcome])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn fetch_with_retry(&self, id: &str) -> Result<TrackedObject, FeedError> {
        let mut attempt = 0;

        loop {
            match self.feed.fetch_object(id).await {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    FETCH_RETRIES.inc();
                    debug!(id = %id, attempt = attempt, error = %e, "Retrying fetch");
                    tokio::time::sleep(Duration::from_millis(self.config.retry_backoff_ms)).await;
                }
                other => return other,
            }
        }
    }
}
