//! Ranking configuration.

use serde::{Deserialize, Serialize};

use super::ordering::ProximityOrdering;

/// Configuration for ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Limit used when the caller does not give one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest limit a caller may request.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Ordering applied to objects with approaches in the window.
    #[serde(default)]
    pub ordering: ProximityOrdering,
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    100
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            ordering: ProximityOrdering::default(),
        }
    }
}
