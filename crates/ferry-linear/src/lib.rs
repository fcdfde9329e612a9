//! # ferry-linear
//!
//! Linear GraphQL client for Ferry. Only one query is needed: the issues
//! assigned to the owner of the API key.

pub mod issues;

mod error;
mod graphql;

pub use error::LinearError;

use std::time::Duration;

/// HTTP client for the Linear GraphQL API.
#[derive(Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    page_size: u32,
}

impl LinearClient {
    /// Create a client authenticating with a personal API key.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, LinearError> {
        let http = reqwest::Client::builder()
            .user_agent("ferry/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            page_size: page_size.max(1),
        })
    }
}
