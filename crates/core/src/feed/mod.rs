//! Remote near-earth object feed.
//!
//! This module provides the `NeoFeed` trait, the single outbound boundary of
//! the crate, and `NeoWsClient`, its implementation against NASA's NeoWs API.

mod neows;
mod types;
mod wire;

pub use neows::{FeedConfig, NeoWsClient};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching a record from the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Object not found (404).
    #[error("Object not found: {0}")]
    NotFound(String),

    /// API key rejected (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// Identifier is empty or otherwise unusable.
    #[error("Invalid object id: {0:?}")]
    InvalidId(String),
}

impl FeedError {
    /// Whether a repeated request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(_) | FeedError::RateLimitExceeded => true,
            FeedError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Source of near-earth object records.
#[async_trait]
pub trait NeoFeed: Send + Sync {
    /// Short backend name for logs and metrics.
    fn name(&self) -> &str;

    /// Fetch one object and its approach events by feed identifier.
    async fn fetch_object(&self, id: &str) -> Result<TrackedObject, FeedError>;
}
