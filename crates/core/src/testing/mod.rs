//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the `NeoFeed` trait,
//! allowing the fetcher, detector and server to be tested without network
//! access.
//!
//! # Example
//!
//! ```rust,ignore
//! use neowatch_core::testing::{fixtures, MockNeoFeed};
//!
//! let feed = MockNeoFeed::new();
//! feed.add_object(fixtures::tracked_object("3542519", &[(today, 50_000.0)])).await;
//!
//! // Hand the feed to an ApproachFetcher...
//! ```

mod mock_feed;

pub use mock_feed::{MockFailure, MockNeoFeed};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::feed::{ApproachEvent, TrackedObject};

    /// Create an approach event with a fixed velocity.
    pub fn approach(date: NaiveDate, miss_distance_km: f64) -> ApproachEvent {
        ApproachEvent {
            date,
            miss_distance_km,
            relative_velocity_kps: 15.0,
            orbiting_body: Some("Earth".to_string()),
        }
    }

    /// Create a non-hazardous object from `(date, miss distance km)` pairs.
    pub fn tracked_object(id: &str, approaches: &[(NaiveDate, f64)]) -> TrackedObject {
        TrackedObject {
            id: id.to_string(),
            name: format!("({})", id),
            hazardous: false,
            approaches: approaches
                .iter()
                .map(|(date, distance)| approach(*date, *distance))
                .collect(),
        }
    }

    /// Create a potentially hazardous object.
    pub fn hazardous_object(id: &str, approaches: &[(NaiveDate, f64)]) -> TrackedObject {
        TrackedObject {
            hazardous: true,
            ..tracked_object(id, approaches)
        }
    }
}
