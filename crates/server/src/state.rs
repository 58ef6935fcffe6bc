use std::sync::Arc;
use neowatch_core::{ApproachDetector, Config, NeoFeed, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    feed: Arc<dyn NeoFeed>,
    detector: ApproachDetector,
}

impl AppState {
    pub fn new(config: Config, feed: Arc<dyn NeoFeed>, detector: ApproachDetector) -> Self {
        Self {
            config,
            feed,
            detector,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn feed(&self) -> &dyn NeoFeed {
        self.feed.as_ref()
    }

    pub fn detector(&self) -> &ApproachDetector {
        &self.detector
    }
}
