//! # ferry-auth
//!
//! OAuth credentials for the Google Tasks side of Ferry.
//!
//! Reads the client secret file, keeps the token cache on disk, runs the
//! loopback browser consent flow (`tiny_http` + `open`, PKCE) when no cache
//! exists, and refreshes the access token as it expires, rewriting the cache
//! each time.

pub mod browser_flow;
pub mod client_secret;
pub mod credential;
pub mod error;
pub mod refresh;
pub mod token_source;
pub mod token_store;

pub use client_secret::ClientSecret;
pub use credential::Credential;
pub use error::AuthError;
pub use token_source::{AccessTokenProvider, StaticToken, TokenSource};
pub use token_store::TokenStore;

use std::path::Path;
use std::time::Duration;

/// Build a refreshing token source, running the consent flow first when the
/// token cache is empty.
///
/// # Errors
///
/// Returns `AuthError` if the client secret cannot be read, the token cache is
/// corrupt, or the consent flow fails.
pub async fn authorize(
    http: &reqwest::Client,
    client_secret_path: &Path,
    store: TokenStore,
    consent_timeout: Duration,
) -> Result<TokenSource, AuthError> {
    let secret = ClientSecret::from_file(client_secret_path)?;

    let credential = if let Some(credential) = store.load()? {
        tracing::debug!(path = %store.path().display(), "using cached credential");
        credential
    } else {
        tracing::info!(path = %store.path().display(), "no cached credential; starting consent flow");
        let credential =
            browser_flow::login(http, &secret, &[browser_flow::TASKS_SCOPE], consent_timeout).await?;
        store.store(&credential)?;
        credential
    };

    Ok(TokenSource::new(http.clone(), secret, store, credential))
}
