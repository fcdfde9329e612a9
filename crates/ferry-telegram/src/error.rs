use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `"ok": false`.
    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Bot API response had no result")]
    MissingResult,
}
