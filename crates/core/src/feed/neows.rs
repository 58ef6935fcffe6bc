//! NASA NeoWs (Near Earth Object Web Service) API client.
//!
//! NeoWs requires an API key for access, passed as the `api_key` query
//! parameter. The shared `DEMO_KEY` is heavily rate limited.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::TrackedObject;
use super::wire::NeoLookupResponse;
use super::{FeedError, NeoFeed};

/// NeoWs API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// NeoWs API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.nasa.gov/neo/rest/v1).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.nasa.gov/neo/rest/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// NeoWs API client.
pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NeoWsClient {
    /// Create a new NeoWs client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        if config.api_key.is_empty() {
            return Err(FeedError::NotConfigured(
                "NeoWs API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn lookup_url(&self, id: &str) -> String {
        format!("{}/neo/{}", self.base_url, urlencoding::encode(id))
    }
}

#[async_trait]
impl NeoFeed for NeoWsClient {
    fn name(&self) -> &str {
        "neows"
    }

    async fn fetch_object(&self, id: &str) -> Result<TrackedObject, FeedError> {
        if id.trim().is_empty() {
            return Err(FeedError::InvalidId(id.to_string()));
        }

        let url = self.lookup_url(id);

        debug!(id = %id, "NeoWs lookup");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FeedError::NotFound(id.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized(
                "NeoWs rejected the API key".to_string(),
            ));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FeedError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let lookup: NeoLookupResponse = serde_json::from_str(&body).map_err(|e| {
            FeedError::ParseError(format!("Failed to parse lookup response: {}", e))
        })?;

        let mut object = TrackedObject::try_from(lookup)?;
        // NeoWs resolves designations to its own id; report the id that was asked for.
        if object.id != id {
            debug!(requested = %id, returned = %object.id, "NeoWs returned a different id");
            object.id = id.to_string();
        }

        Ok(object)
    }
}
