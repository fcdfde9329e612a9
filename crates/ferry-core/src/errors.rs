//! Errors raised by the core rules.
//!
//! Client errors (`TasksError`, `LinearError`, `TelegramError`) live in their
//! own crates and meet this one in `ferry-sync`'s `SyncError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected by a core rule, e.g. a chat message with a blank title.
    #[error("Validation error: {0}")]
    Validation(String),
}
