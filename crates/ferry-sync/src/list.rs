//! The single task list the bridge works against, addressed by title.

use std::sync::Arc;

use ferry_core::entities::{Task, TaskDraft};
use tracing::debug;

use crate::error::SyncError;
use crate::ports::TaskService;

/// A task list resolved by title on every operation.
///
/// Nothing is cached: renaming or recreating the list in the service takes
/// effect on the next call.
#[derive(Clone)]
pub struct ScopedList {
    service: Arc<dyn TaskService>,
    title: String,
}

impl ScopedList {
    pub fn new(service: Arc<dyn TaskService>, title: impl Into<String>) -> Self {
        Self {
            service,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// # Errors
    ///
    /// Returns [`SyncError::ListNotFound`] when no list carries the title.
    pub async fn resolve(&self) -> Result<String, SyncError> {
        let id = self
            .service
            .find_list(&self.title)
            .await?
            .ok_or_else(|| SyncError::ListNotFound(self.title.clone()))?;
        debug!(title = %self.title, list_id = %id, "resolved task list");
        Ok(id)
    }

    /// All tasks of the list, completed ones included.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ListNotFound`] or a service error.
    pub async fn tasks(&self) -> Result<Vec<Task>, SyncError> {
        let list_id = self.resolve().await?;
        self.service.list_tasks(&list_id).await
    }

    /// Tasks still waiting to be done.
    ///
    /// # Errors
    ///
    /// Same as [`Self::tasks`].
    pub async fn open_tasks(&self) -> Result<Vec<Task>, SyncError> {
        let mut tasks = self.tasks().await?;
        tasks.retain(Task::is_open);
        Ok(tasks)
    }

    /// # Errors
    ///
    /// Same as [`Self::tasks`].
    pub async fn insert(&self, draft: &TaskDraft) -> Result<Task, SyncError> {
        let list_id = self.resolve().await?;
        self.service.insert_task(&list_id, draft).await
    }

    /// Mark the task with `task_id` completed.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::TaskNotFound`] when the list holds no such task,
    /// besides the errors of [`Self::tasks`].
    pub async fn complete(&self, task_id: &str) -> Result<Task, SyncError> {
        let list_id = self.resolve().await?;
        let task = self
            .service
            .list_tasks(&list_id)
            .await?
            .into_iter()
            .find(|task| task.id == task_id)
            .ok_or_else(|| SyncError::TaskNotFound(task_id.to_string()))?;
        self.service
            .update_task(&list_id, &task.into_completed())
            .await
    }

    pub(crate) fn service(&self) -> &Arc<dyn TaskService> {
        &self.service
    }
}
