//! Port implementations for the real clients.

use async_trait::async_trait;
use ferry_core::entities::{Issue, Task, TaskDraft};
use ferry_gtasks::TasksClient;
use ferry_linear::LinearClient;

use crate::error::SyncError;
use crate::ports::{IssueSource, TaskService};

#[async_trait]
impl TaskService for TasksClient {
    async fn find_list(&self, title: &str) -> Result<Option<String>, SyncError> {
        Ok(self.find_task_list(title).await?.map(|list| list.id))
    }

    async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>, SyncError> {
        Ok(Self::list_tasks(self, list_id).await?)
    }

    async fn insert_task(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, SyncError> {
        Ok(Self::insert_task(self, list_id, draft).await?)
    }

    async fn update_task(&self, list_id: &str, task: &Task) -> Result<Task, SyncError> {
        Ok(Self::update_task(self, list_id, task).await?)
    }
}

#[async_trait]
impl IssueSource for LinearClient {
    async fn assigned_issues(&self) -> Result<Vec<Issue>, SyncError> {
        Ok(Self::assigned_issues(self).await?)
    }
}
