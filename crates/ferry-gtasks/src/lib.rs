//! # ferry-gtasks
//!
//! Google Tasks REST v1 client for Ferry.
//!
//! Covers the four calls the bridge needs: list task lists, list tasks in a
//! list, insert a task, and update a task. Every request carries a bearer
//! token from a [`ferry_auth::AccessTokenProvider`]; a `401` triggers one
//! forced refresh and a single retry.

pub mod lists;
pub mod tasks;

mod error;
mod http;

pub use error::TasksError;
pub use lists::TaskList;

use std::sync::Arc;
use std::time::Duration;

use ferry_auth::AccessTokenProvider;

use crate::http::check_response;

/// Page size used for every list call (the service maximum).
const MAX_RESULTS: &str = "100";

/// HTTP client for the Google Tasks API.
#[derive(Clone)]
pub struct TasksClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl TasksClient {
    /// Create a client against `base_url` (e.g. `https://tasks.googleapis.com/tasks/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`TasksError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
        timeout: Duration,
    ) -> Result<Self, TasksError> {
        let http = reqwest::Client::builder()
            .user_agent("ferry/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self::with_http(http, base_url, tokens))
    }

    /// Create a client sharing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send an authorized request, retrying once with a refreshed token when
    /// the service answers [`TasksError::Unauthorized`].
    async fn send<F>(&self, build: F) -> Result<reqwest::Response, TasksError>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let token = self.tokens.access_token().await?;
        let resp = build(&self.http).bearer_auth(token).send().await?;
        match check_response(resp).await {
            Err(TasksError::Unauthorized { message }) => {
                tracing::warn!(%message, "access token rejected by the task-list service; refreshing");
            }
            other => return other,
        }

        let token = self.tokens.refresh().await?;
        let resp = build(&self.http).bearer_auth(token).send().await?;
        check_response(resp).await
    }
}
