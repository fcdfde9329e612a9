//! General application configuration.

use serde::{Deserialize, Serialize};

/// Seconds between reconciliation ticks.
const fn default_sync_interval_secs() -> u64 {
    600
}

const fn default_max_concurrent_creates() -> usize {
    4
}

const fn default_http_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Upper bound on task inserts in flight during one tick.
    #[serde(default = "default_max_concurrent_creates")]
    pub max_concurrent_creates: usize,

    /// Per-request timeout for every outbound HTTP call except long polls.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            sync_interval_secs: default_sync_interval_secs(),
            max_concurrent_creates: default_max_concurrent_creates(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}
