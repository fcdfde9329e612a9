use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Cached OAuth credential for the task-list service.
///
/// Field names follow the token cache format written by Google's client
/// libraries, so an existing `token.json` keeps working. `expiry_date` is in
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Credential {
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.and_then(DateTime::from_timestamp_millis)
    }

    /// Check if the access token is expired or expires within `buffer_secs`.
    ///
    /// A credential without a known expiry is treated as still valid; a
    /// rejected request triggers a refresh instead.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64, now: DateTime<Utc>) -> bool {
        self.expires_at()
            .is_some_and(|expires_at| expires_at <= now + TimeDelta::seconds(buffer_secs))
    }

    /// Fold a refreshed credential into this one.
    ///
    /// Refresh responses usually omit the refresh token; the cached one is kept.
    #[must_use]
    pub fn merge_refreshed(self, refreshed: Self) -> Self {
        Self {
            refresh_token: refreshed.refresh_token.or(self.refresh_token),
            scope: refreshed.scope.or(self.scope),
            ..refreshed
        }
    }
}

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl TokenResponse {
    pub(crate) fn into_credential(self, now: DateTime<Utc>) -> Credential {
        Credential {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expiry_date: self
                .expires_in
                .map(|secs| (now + TimeDelta::seconds(secs)).timestamp_millis()),
            token_type: self.token_type,
            scope: self.scope,
        }
    }
}
