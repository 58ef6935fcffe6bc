//! Close approach detection.
//!
//! `ApproachDetector` fetches a set of objects and ranks them, returning the
//! ranking together with the fetch accounting so callers can tell "nothing
//! close this week" apart from "the feed is down".

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::feed::TrackedObject;
use crate::fetcher::{ApproachFetcher, FetchFailure};
use crate::ranker::{ApproachRanker, DateWindow};

/// Fetch accounting included with a detection.
#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub not_completed: usize,
    pub failures: Vec<FetchFailure>,
}

/// Result of a detection run.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Window the approaches were filtered against.
    pub window: DateWindow,
    /// Ranked objects, closest first.
    pub approaches: Vec<TrackedObject>,
    /// Number of potentially hazardous objects in `approaches`.
    pub hazardous_count: usize,
    pub fetch: FetchSummary,
}

/// Fetches objects and ranks their close approaches.
pub struct ApproachDetector {
    fetcher: ApproachFetcher,
    ranker: ApproachRanker,
}

impl ApproachDetector {
    pub fn new(fetcher: ApproachFetcher, ranker: ApproachRanker) -> Self {
        Self { fetcher, ranker }
    }

    pub fn ranker(&self) -> &ApproachRanker {
        &self.ranker
    }

    /// Closest approaches this week among `ids`.
    pub async fn closest_approaches(&self, ids: &[String], limit: usize) -> Detection {
        self.closest_approaches_at(ids, limit, Local::now().date_naive())
            .await
    }

    /// Closest approaches in the week containing `today`.
    pub async fn closest_approaches_at(
        &self,
        ids: &[String],
        limit: usize,
        today: NaiveDate,
    ) -> Detection {
        let report = self.fetcher.fetch_all(ids).await;

        info!(
            received = report.succeeded,
            requested = report.attempted,
            "Received objects, now ranking"
        );

        let fetch = FetchSummary {
            attempted: report.attempted,
            succeeded: report.succeeded,
            failed: report.failed(),
            not_completed: report.not_completed,
            failures: report.failures,
        };

        let window = DateWindow::current_week(today);
        let approaches = self.ranker.rank_in_window(report.objects, limit, window);

        let mut hazardous_count = 0;
        for object in approaches.iter().filter(|o| o.hazardous) {
            hazardous_count += 1;
            if let Some(closest) = object.closest_approach() {
                warn!(
                    id = %object.id,
                    name = %object.name,
                    date = %closest.date,
                    miss_distance_km = closest.miss_distance_km,
                    "Potentially hazardous object approaching"
                );
            }
        }

        Detection {
            window,
            approaches,
            hazardous_count,
            fetch,
        }
    }
}
