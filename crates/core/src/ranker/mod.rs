//! Ranking of fetched objects by proximity.
//!
//! The ranker is pure: it keeps only the approach events inside the active
//! window (the current calendar week), drops objects left without events,
//! stably sorts the survivors with the configured `ProximityOrdering` and
//! truncates to the requested limit.

mod config;
mod ordering;
mod window;

pub use config::RankingConfig;
pub use ordering::ProximityOrdering;
pub use window::DateWindow;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::feed::TrackedObject;
use crate::metrics::OBJECTS_IN_WINDOW;

/// Errors raised for invalid ranking requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("Limit must not be negative, got {0}")]
    InvalidLimit(i64),

    #[error("Limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: usize, max: usize },
}

/// Ranks objects by their approaches in the active window.
#[derive(Debug, Clone, Default)]
pub struct ApproachRanker {
    config: RankingConfig,
}

impl ApproachRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Check a caller-supplied limit.
    pub fn validate_limit(&self, limit: i64) -> Result<usize, RankError> {
        let limit = usize::try_from(limit).map_err(|_| RankError::InvalidLimit(limit))?;
        if limit > self.config.max_limit {
            return Err(RankError::LimitTooLarge {
                limit,
                max: self.config.max_limit,
            });
        }
        Ok(limit)
    }

    /// Rank against the current week, using the local clock once.
    pub fn rank_closest(&self, objects: Vec<TrackedObject>, limit: usize) -> Vec<TrackedObject> {
        self.rank_closest_at(objects, limit, Local::now().date_naive())
    }

    /// Rank against the week containing `today`.
    pub fn rank_closest_at(
        &self,
        objects: Vec<TrackedObject>,
        limit: usize,
        today: NaiveDate,
    ) -> Vec<TrackedObject> {
        self.rank_in_window(objects, limit, DateWindow::current_week(today))
    }

    /// Rank against an explicit window.
    pub fn rank_in_window(
        &self,
        objects: Vec<TrackedObject>,
        limit: usize,
        window: DateWindow,
    ) -> Vec<TrackedObject> {
        if limit == 0 || objects.is_empty() {
            return Vec::new();
        }

        let total = objects.len();
        let mut in_window: Vec<TrackedObject> = objects
            .into_iter()
            .filter_map(|mut object| {
                object.approaches.retain(|a| window.contains(a.date));
                (!object.approaches.is_empty()).then_some(object)
            })
            .collect();

        OBJECTS_IN_WINDOW
            .with_label_values(&[])
            .observe(in_window.len() as f64);

        // sort_by is stable, ties keep input order
        let ordering = self.config.ordering;
        in_window.sort_by(|a, b| ordering.compare(a, b));
        in_window.truncate(limit);

        debug!(
            total = total,
            returned = in_window.len(),
            window_start = %window.start,
            window_end = %window.end,
            ordering = ?ordering,
            "Ranked objects"
        );

        in_window
    }
}
