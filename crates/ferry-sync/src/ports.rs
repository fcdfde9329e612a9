//! Seams between the sync logic and the outside world.
//!
//! Production implementations live in [`crate::adapters`] (Google Tasks,
//! Linear) and in `ferry-telegram` (chat). [`crate::memory`] has in-memory
//! versions for tests.

use async_trait::async_trait;
use ferry_core::entities::{Issue, Task, TaskDraft};

use crate::error::SyncError;

/// The task-list service.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Id of the first list titled `title`, if any.
    async fn find_list(&self, title: &str) -> Result<Option<String>, SyncError>;

    /// Every task in the list, completed ones included.
    async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>, SyncError>;

    async fn insert_task(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, SyncError>;

    /// Replace the task addressed by `task.id`.
    async fn update_task(&self, list_id: &str, task: &Task) -> Result<Task, SyncError>;
}

/// The issue tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Every issue assigned to the user.
    async fn assigned_issues(&self) -> Result<Vec<Issue>, SyncError>;
}

/// Outbound chat messages, rendered as Telegram MarkdownV2.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send_markdown(&self, text: &str) -> Result<(), SyncError>;
}
