pub mod config;
pub mod detector;
pub mod feed;
pub mod fetcher;
pub mod metrics;
pub mod ranker;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, WatchlistConfig,
};
pub use detector::{ApproachDetector, Detection, FetchSummary};
pub use feed::{ApproachEvent, FeedConfig, FeedError, NeoFeed, NeoWsClient, TrackedObject};
pub use fetcher::{ApproachFetcher, FetchFailure, FetchReport, FetcherConfig};
pub use ranker::{ApproachRanker, DateWindow, ProximityOrdering, RankError, RankingConfig};
