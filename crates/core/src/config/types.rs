use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::feed::FeedConfig;
use crate::fetcher::FetcherConfig;
use crate::ranker::{ProximityOrdering, RankingConfig};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Objects checked when a request does not name any.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WatchlistConfig {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub feed: SanitizedFeedConfig,
    pub fetcher: FetcherConfig,
    pub ranking: RankingConfig,
    pub server: ServerConfig,
    pub watchlist: WatchlistConfig,
}

/// Sanitized feed config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFeedConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            feed: SanitizedFeedConfig {
                base_url: config.feed.base_url.clone(),
                api_key_configured: !config.feed.api_key.is_empty(),
                timeout_secs: config.feed.timeout_secs,
            },
            fetcher: config.fetcher.clone(),
            ranking: config.ranking.clone(),
            server: config.server.clone(),
            watchlist: config.watchlist.clone(),
        }
    }
}

impl Config {
    /// Minimal configuration around an API key, everything else defaulted.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            feed: FeedConfig {
                api_key: api_key.into(),
                base_url: "https://api.nasa.gov/neo/rest/v1".to_string(),
                timeout_secs: 30,
            },
            fetcher: FetcherConfig::default(),
            ranking: RankingConfig::default(),
            server: ServerConfig::default(),
            watchlist: WatchlistConfig::default(),
        }
    }

    /// Ordering shorthand used in startup logs.
    pub fn ordering(&self) -> ProximityOrdering {
        self.ranking.ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[feed]
api_key = "DEMO_KEY"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.api_key, "DEMO_KEY");
        assert_eq!(config.feed.base_url, "https://api.nasa.gov/neo/rest/v1");
        assert_eq!(config.feed.timeout_secs, 30);
        assert_eq!(config.fetcher.max_concurrent_fetches, 10);
        assert_eq!(config.fetcher.max_retries, 0);
        assert_eq!(config.ranking.default_limit, 10);
        assert_eq!(config.ranking.ordering, ProximityOrdering::MissDistance);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.watchlist.ids.is_empty());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[feed]
api_key = "secret"
base_url = "http://localhost:9000"
timeout_secs = 5

[fetcher]
max_concurrent_fetches = 4
deadline_secs = 20
max_retries = 2
retry_backoff_ms = 250

[ranking]
default_limit = 3
max_limit = 50
ordering = "relative_velocity"

[server]
host = "127.0.0.1"
port = 9000

[watchlist]
ids = ["3542519", "2000433"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.base_url, "http://localhost:9000");
        assert_eq!(config.fetcher.max_concurrent_fetches, 4);
        assert_eq!(config.fetcher.deadline_secs, Some(20));
        assert_eq!(config.fetcher.max_retries, 2);
        assert_eq!(config.fetcher.retry_backoff_ms, 250);
        assert_eq!(config.ranking.default_limit, 3);
        assert_eq!(config.ranking.max_limit, 50);
        assert_eq!(config.ordering(), ProximityOrdering::RelativeVelocity);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.watchlist.ids, vec!["3542519", "2000433"]);
    }

    #[test]
    fn test_deserialize_missing_feed_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config = Config::with_api_key("secret-key");

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.feed.api_key_configured);
        assert_eq!(sanitized.server.port, 8080);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
