//! Task-list client error types.

use thiserror::Error;

/// Errors that can occur when talking to Google Tasks.
#[derive(Debug, Error)]
pub enum TasksError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Could not obtain an access token.
    #[error("auth error: {0}")]
    Auth(#[from] ferry_auth::AuthError),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// `STATUS: message` from the error body, or the raw body.
        message: String,
    },

    /// The access token was rejected (401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The service reported a quota error (429, or 403 with a rate-limit reason).
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Task to update has no id.
    #[error("task has no id: {title}")]
    MissingId { title: String },
}
