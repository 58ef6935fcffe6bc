//! Domain types for near-earth object records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One predicted close pass of an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApproachEvent {
    /// Calendar date of the close approach.
    pub date: NaiveDate,
    /// Miss distance in kilometers.
    pub miss_distance_km: f64,
    /// Relative velocity in kilometers per second.
    pub relative_velocity_kps: f64,
    /// Body the object passes (usually "Earth").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbiting_body: Option<String>,
}

/// A near-earth object and its approach events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedObject {
    /// Feed identifier (NeoWs asteroid id).
    pub id: String,
    /// Display name, e.g. "(2010 PK9)".
    pub name: String,
    /// Flagged by the feed as potentially hazardous.
    #[serde(default)]
    pub hazardous: bool,
    /// Approach events in feed order.
    #[serde(default)]
    pub approaches: Vec<ApproachEvent>,
}

impl TrackedObject {
    /// Smallest miss distance among the object's events.
    pub fn min_miss_distance_km(&self) -> Option<f64> {
        self.approaches
            .iter()
            .map(|a| a.miss_distance_km)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Largest relative velocity among the object's events.
    pub fn max_relative_velocity_kps(&self) -> Option<f64> {
        self.approaches
            .iter()
            .map(|a| a.relative_velocity_kps)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// The event with the smallest miss distance.
    pub fn closest_approach(&self) -> Option<&ApproachEvent> {
        self.approaches
            .iter()
            .min_by(|a, b| a.miss_distance_km.total_cmp(&b.miss_distance_km))
    }
}
