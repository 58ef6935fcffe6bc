//! Close approach ranking handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::handlers::ErrorResponse;
use crate::metrics::{DETECTIONS_TOTAL, HAZARDOUS_IN_LAST_DETECTION};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClosestParams {
    /// Number of objects to return (default: `ranking.default_limit`).
    #[serde(default)]
    pub limit: Option<i64>,
    /// Comma-separated object ids (default: the configured watchlist).
    /// An empty value means no objects.
    #[serde(default)]
    pub ids: Option<String>,
}

/// GET /api/v1/approaches/closest
///
/// Rank the requested objects by their closest approach this week.
pub async fn closest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClosestParams>,
) -> impl IntoResponse {
    let ranker = state.detector().ranker();

    let limit = match params.limit {
        Some(limit) => match ranker.validate_limit(limit) {
            Ok(limit) => limit,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response();
            }
        },
        None => ranker.config().default_limit,
    };

    // Blank entries are kept so the fetcher reports them as invalid ids.
    let ids: Vec<String> = match params.ids.as_deref().map(str::trim) {
        Some("") => Vec::new(),
        Some(raw) => raw.split(',').map(|id| id.trim().to_string()).collect(),
        None => state.config().watchlist.ids.clone(),
    };

    info!(objects = ids.len(), limit = limit, "Closest approaches requested");

    let detection = state.detector().closest_approaches(&ids, limit).await;

    let outcome = if detection.fetch.attempted > 0 && detection.fetch.succeeded == 0 {
        "feed_unavailable"
    } else if detection.fetch.succeeded < detection.fetch.attempted {
        "partial"
    } else {
        "complete"
    };
    DETECTIONS_TOTAL.with_label_values(&[outcome]).inc();
    HAZARDOUS_IN_LAST_DETECTION.set(detection.hazardous_count as i64);

    Json(detection).into_response()
}
