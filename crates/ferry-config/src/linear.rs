//! Linear issue-tracker configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.linear.app/graphql".to_string()
}

/// Default relevance window in days.
const fn default_lookback_days() -> u32 {
    14
}

const fn default_page_size() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinearConfig {
    /// Personal API key. Also read from `LINEAR_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// GraphQL endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Issues updated longer ago than this are ignored.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Page size for `assignedIssues` pagination.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            lookback_days: default_lookback_days(),
            page_size: default_page_size(),
        }
    }
}

impl LinearConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = LinearConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_url, "https://api.linear.app/graphql");
        assert_eq!(config.lookback_days, 14);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn whitespace_key_is_not_configured() {
        let config = LinearConfig {
            api_key: "  ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
