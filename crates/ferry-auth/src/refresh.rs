use chrono::Utc;

use crate::client_secret::ClientSecret;
use crate::credential::{Credential, TokenResponse};
use crate::error::AuthError;

/// Exchange a refresh token for a new access token.
///
/// The returned credential carries whatever the token endpoint sent back; use
/// [`Credential::merge_refreshed`] to keep the cached refresh token.
///
/// # Errors
///
/// Returns `AuthError::RefreshFailed` if the endpoint rejects the request
/// (revoked grant, wrong client) or `AuthError::Http` on transport failure.
pub async fn refresh(
    http: &reqwest::Client,
    secret: &ClientSecret,
    refresh_token: &str,
) -> Result<Credential, AuthError> {
    let resp = http
        .post(&secret.token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::RefreshFailed(format!("{status}: {body}")));
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| AuthError::RefreshFailed(format!("parse token response: {e}")))?;
    Ok(token.into_credential(Utc::now()))
}

/// Exchange an authorization code from the consent flow for a credential.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the endpoint rejects the code.
pub async fn exchange_code(
    http: &reqwest::Client,
    secret: &ClientSecret,
    code: &str,
    redirect_uri: &str,
    code_verifier: &str,
) -> Result<Credential, AuthError> {
    let resp = http
        .post(&secret.token_uri)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("code_verifier", code_verifier),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::BrowserFlowFailed(format!(
            "code exchange rejected ({status}): {body}"
        )));
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("parse token response: {e}")))?;
    Ok(token.into_credential(Utc::now()))
}
