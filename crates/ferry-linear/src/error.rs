//! Issue-tracker client error types.

use thiserror::Error;

/// Errors that can occur when querying Linear.
#[derive(Debug, Error)]
pub enum LinearError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Linear returned a non-success status without GraphQL errors.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The query ran but Linear reported errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Linear returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response had neither data nor errors.
    #[error("response contained no data")]
    MissingData,
}
