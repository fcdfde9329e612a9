//! Sync error types.

use ferry_core::errors::CoreError;
use ferry_gtasks::TasksError;
use ferry_linear::LinearError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("task-list service: {0}")]
    Tasks(#[from] TasksError),

    #[error("issue tracker: {0}")]
    Linear(#[from] LinearError),

    /// Delivering a message to the chat failed.
    #[error("chat transport: {0}")]
    Chat(String),

    #[error("no task list titled '{0}'")]
    ListNotFound(String),

    #[error("no task with id '{0}' in the list")]
    TaskNotFound(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
