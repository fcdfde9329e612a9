//! Hands out access tokens, refreshing and re-persisting them as they expire.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::client_secret::ClientSecret;
use crate::credential::Credential;
use crate::error::AuthError;
use crate::token_store::TokenStore;

/// Refresh this many seconds before the recorded expiry.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Anything that can authorize a request to the task-list service.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A token believed to be valid right now.
    async fn access_token(&self) -> Result<String, AuthError>;

    /// Force a refresh after the service rejected the current token.
    async fn refresh(&self) -> Result<String, AuthError>;
}

/// Refreshing provider backed by the on-disk token cache.
///
/// Refreshes are serialized behind a mutex so concurrent callers never race
/// two refresh requests.
pub struct TokenSource {
    http: reqwest::Client,
    secret: ClientSecret,
    store: TokenStore,
    credential: Mutex<Credential>,
}

impl TokenSource {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        secret: ClientSecret,
        store: TokenStore,
        credential: Credential,
    ) -> Self {
        Self {
            http,
            secret,
            store,
            credential: Mutex::new(credential),
        }
    }

    async fn refresh_locked(&self, current: &mut Credential) -> Result<String, AuthError> {
        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or(AuthError::MissingRefreshToken)?;
        let refreshed = crate::refresh::refresh(&self.http, &self.secret, &refresh_token).await?;
        let merged = current.clone().merge_refreshed(refreshed);

        if let Err(error) = self.store.store(&merged) {
            tracing::error!(%error, "failed to persist refreshed credential; using it in memory");
        }
        tracing::info!(expires_at = ?merged.expires_at(), "access token refreshed");

        *current = merged;
        Ok(current.access_token.clone())
    }
}

#[async_trait]
impl AccessTokenProvider for TokenSource {
    async fn access_token(&self) -> Result<String, AuthError> {
        let mut credential = self.credential.lock().await;
        if credential.is_near_expiry(EXPIRY_BUFFER_SECS, Utc::now()) {
            return self.refresh_locked(&mut credential).await;
        }
        Ok(credential.access_token.clone())
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let mut credential = self.credential.lock().await;
        self.refresh_locked(&mut credential).await
    }
}

/// Fixed bearer token, for tests and short-lived manual runs.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}
