//! Telegram bot configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Long-poll timeout for `getUpdates`, in seconds.
const fn default_poll_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Also read from `TELEGRAM_KEY`.
    #[serde(default)]
    pub token: String,

    /// Numeric user id of the only person allowed to control the bot.
    /// Also read from `TELEGRAM_OWNER`. `0` means unset.
    #[serde(default)]
    pub owner_id: i64,

    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner_id: 0,
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl TelegramConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty() && self.owner_id != 0
    }
}
