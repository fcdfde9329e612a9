//! Minimal Telegram Bot API client: `getUpdates` and `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use ferry_sync::SyncError;
use ferry_sync::ports::MessageSink;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::TelegramError;
use crate::types::{ApiResponse, GetUpdates, SendMessage, Update};

/// Extra time on top of the long-poll timeout before the HTTP call gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl BotClient {
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the HTTP client fails to build.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .user_agent("ferry/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self::with_http(http, base_url, token))
    }

    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Long-poll for updates with id at least `offset`.
    ///
    /// # Errors
    ///
    /// Returns transport and Bot API errors.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message"],
        };
        let wait = Duration::from_secs(timeout_secs) + POLL_GRACE;
        self.call("getUpdates", &body, Some(wait)).await
    }

    /// # Errors
    ///
    /// Returns transport and Bot API errors, e.g. a MarkdownV2 parse failure.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<(), TelegramError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode,
        };
        let _: serde_json::Value = self.call("sendMessage", &body, None).await?;
        debug!(chat_id, "message sent");
        Ok(())
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{method}", self.base_url, self.token);
        let mut request = self.http.post(&url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let resp = request.send().await?;
        let status = resp.status();

        // Error responses carry the same JSON envelope, so the status code
        // only matters when the body isn't one.
        let envelope: ApiResponse<T> = match resp.json().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(TelegramError::Api {
                    code: i64::from(status.as_u16()),
                    description: status.to_string(),
                });
            }
        };

        if envelope.ok {
            return envelope.result.ok_or(TelegramError::MissingResult);
        }
        let code = envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16()));
        if code == 429 {
            return Err(TelegramError::RateLimited {
                retry_after_secs: envelope
                    .parameters
                    .and_then(|p| p.retry_after)
                    .unwrap_or(30),
            });
        }
        Err(TelegramError::Api {
            code,
            description: envelope.description.unwrap_or_default(),
        })
    }
}

/// The owner's private chat as a [`MessageSink`], rendered as MarkdownV2.
#[derive(Clone)]
pub struct OwnerChat {
    client: BotClient,
    chat_id: i64,
}

impl OwnerChat {
    #[must_use]
    pub const fn new(client: BotClient, chat_id: i64) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl MessageSink for OwnerChat {
    async fn send_markdown(&self, text: &str) -> Result<(), SyncError> {
        self.client
            .send_message(self.chat_id, text, Some("MarkdownV2"))
            .await
            .map_err(|e| SyncError::Chat(e.to_string()))
    }
}
