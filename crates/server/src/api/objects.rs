//! Single object lookup handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use neowatch_core::FeedError;
use tracing::warn;

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// GET /api/v1/objects/{id}
///
/// Fetch one object with all of its approach events (no window filter).
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.feed().fetch_object(&id).await {
        Ok(object) => Json(object).into_response(),
        Err(e) => {
            let status = match &e {
                FeedError::NotFound(_) => StatusCode::NOT_FOUND,
                FeedError::InvalidId(_) => StatusCode::BAD_REQUEST,
                FeedError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            };
            if status == StatusCode::BAD_GATEWAY {
                warn!(id = %id, error = %e, "Object lookup failed");
            }
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
