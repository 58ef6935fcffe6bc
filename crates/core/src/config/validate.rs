use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Feed API key is set
/// - At least one fetch may be in flight
/// - Default ranking limit does not exceed the maximum
/// - Server port is not 0
/// - Watchlist ids are not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.feed.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "feed.api_key cannot be empty".to_string(),
        ));
    }

    if config.fetcher.max_concurrent_fetches == 0 {
        return Err(ConfigError::ValidationError(
            "fetcher.max_concurrent_fetches must be at least 1".to_string(),
        ));
    }

    if config.ranking.default_limit > config.ranking.max_limit {
        return Err(ConfigError::ValidationError(format!(
            "ranking.default_limit ({}) exceeds ranking.max_limit ({})",
            config.ranking.default_limit, config.ranking.max_limit
        )));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(pos) = config.watchlist.ids.iter().position(|id| id.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "watchlist.ids[{}] is empty",
            pos
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config::with_api_key("DEMO_KEY")
    }

    fn assert_invalid(config: &Config) {
        let result = validate_config(config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = valid();
        config.feed.api_key = "  ".to_string();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_zero_concurrency_fails() {
        let mut config = valid();
        config.fetcher.max_concurrent_fetches = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_default_limit_above_max_fails() {
        let mut config = valid();
        config.ranking.default_limit = 20;
        config.ranking.max_limit = 10;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid();
        config.server.port = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_blank_watchlist_id_fails() {
        let mut config = valid();
        config.watchlist.ids = vec!["3542519".to_string(), "".to_string()];
        assert_invalid(&config);
    }
}
