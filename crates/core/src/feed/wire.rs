//! NeoWs `neo/{id}` response types (private).

use chrono::NaiveDate;
use serde::Deserialize;

use super::types::{ApproachEvent, TrackedObject};
use super::FeedError;

#[derive(Debug, Deserialize)]
pub(super) struct NeoLookupResponse {
    id: String,
    name: String,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Option<Vec<CloseApproachData>>,
}

#[derive(Debug, Deserialize)]
struct CloseApproachData {
    close_approach_date: Option<String>,
    relative_velocity: Option<RelativeVelocity>,
    miss_distance: Option<MissDistance>,
    orbiting_body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelativeVelocity {
    kilometers_per_second: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MissDistance {
    kilometers: Option<String>,
}

impl TryFrom<NeoLookupResponse> for TrackedObject {
    type Error = FeedError;

    fn try_from(response: NeoLookupResponse) -> Result<Self, Self::Error> {
        let approaches = response
            .close_approach_data
            .unwrap_or_default()
            .into_iter()
            .map(ApproachEvent::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| match e {
                FeedError::ParseError(msg) => {
                    FeedError::ParseError(format!("object {}: {}", response.id, msg))
                }
                other => other,
            })?;

        Ok(TrackedObject {
            id: response.id,
            name: response.name,
            hazardous: response.is_potentially_hazardous_asteroid,
            approaches,
        })
    }
}

impl TryFrom<CloseApproachData> for ApproachEvent {
    type Error = FeedError;

    fn try_from(data: CloseApproachData) -> Result<Self, Self::Error> {
        let raw_date = data
            .close_approach_date
            .ok_or_else(|| FeedError::ParseError("missing close_approach_date".to_string()))?;
        let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
            FeedError::ParseError(format!("invalid close_approach_date {:?}: {}", raw_date, e))
        })?;

        let miss_distance_km = parse_number(
            "miss_distance.kilometers",
            data.miss_distance.and_then(|m| m.kilometers),
        )?;
        let relative_velocity_kps = parse_number(
            "relative_velocity.kilometers_per_second",
            data.relative_velocity.and_then(|v| v.kilometers_per_second),
        )?;

        Ok(ApproachEvent {
            date,
            miss_distance_km,
            relative_velocity_kps,
            orbiting_body: data.orbiting_body,
        })
    }
}

/// NeoWs encodes its measurements as decimal strings.
fn parse_number(field: &str, raw: Option<String>) -> Result<f64, FeedError> {
    let raw = raw.ok_or_else(|| FeedError::ParseError(format!("missing {}", field)))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FeedError::ParseError(format!("invalid {} {:?}", field, raw)))?;

    if !value.is_finite() {
        return Err(FeedError::ParseError(format!(
            "non-finite {} {:?}",
            field, raw
        )));
    }

    Ok(value)
}
