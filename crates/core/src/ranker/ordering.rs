//! Proximity orderings used to rank objects.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::feed::TrackedObject;

/// How objects are ranked once their events have been filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityOrdering {
    /// Smallest miss distance first.
    #[default]
    MissDistance,
    /// Fastest relative velocity first.
    RelativeVelocity,
}

impl ProximityOrdering {
    /// Compare two objects. Objects without events sort last.
    pub fn compare(&self, a: &TrackedObject, b: &TrackedObject) -> Ordering {
        match self {
            ProximityOrdering::MissDistance => compare_keys(
                a.min_miss_distance_km(),
                b.min_miss_distance_km(),
                |x, y| x.total_cmp(&y),
            ),
            ProximityOrdering::RelativeVelocity => compare_keys(
                a.max_relative_velocity_kps(),
                b.max_relative_velocity_kps(),
                |x, y| y.total_cmp(&x),
            ),
        }
    }
}

fn compare_keys(a: Option<f64>, b: Option<f64>, cmp: impl Fn(f64, f64) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
