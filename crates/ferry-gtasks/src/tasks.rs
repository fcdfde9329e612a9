//! Task resources within a list.

use ferry_core::entities::{Task, TaskDraft};
use serde::Deserialize;

use crate::{MAX_RESULTS, TasksClient, error::TasksError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksPage {
    #[serde(default)]
    items: Vec<Task>,
    next_page_token: Option<String>,
}

impl TasksClient {
    fn tasks_url(&self, list_id: &str) -> String {
        self.url(&format!("/lists/{}/tasks", urlencoding::encode(list_id)))
    }

    /// Every task in the list, completed ones included, following pagination.
    ///
    /// # Errors
    ///
    /// Returns [`TasksError`] if a request fails or the service returns a
    /// non-success status.
    pub async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>, TasksError> {
        let url = self.tasks_url(list_id);
        let mut tasks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let resp = self
                .send(|http| {
                    let request = http
                        .get(&url)
                        .query(&[
                            ("maxResults", MAX_RESULTS),
                            ("showCompleted", "true"),
                            ("showHidden", "true"),
                        ]);
                    match &page_token {
                        Some(token) => request.query(&[("pageToken", token)]),
                        None => request,
                    }
                })
                .await?;
            let page: TasksPage = resp.json().await?;
            tasks.extend(page.items);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(list_id, count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Create a task at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns [`TasksError`] if the request fails or the service rejects it.
    pub async fn insert_task(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, TasksError> {
        let url = self.tasks_url(list_id);
        let resp = self.send(|http| http.post(&url).json(draft)).await?;
        let task: Task = resp.json().await?;
        tracing::debug!(list_id, task_id = %task.id, title = %task.title, "inserted task");
        Ok(task)
    }

    /// Replace a task with `task`, addressed by `task.id`.
    ///
    /// # Errors
    ///
    /// Returns [`TasksError::MissingId`] if `task.id` is empty, otherwise
    /// [`TasksError`] if the request fails or the service rejects it.
    pub async fn update_task(&self, list_id: &str, task: &Task) -> Result<Task, TasksError> {
        if task.id.is_empty() {
            return Err(TasksError::MissingId {
                title: task.title.clone(),
            });
        }
        let url = self.url(&format!(
            "/lists/{}/tasks/{}",
            urlencoding::encode(list_id),
            urlencoding::encode(&task.id)
        ));
        let resp = self.send(|http| http.put(&url).json(task)).await?;
        let updated: Task = resp.json().await?;
        tracing::debug!(list_id, task_id = %updated.id, status = %updated.status, "updated task");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::enums::TaskStatus;

    #[test]
    fn parse_tasks_page() {
        let page: TasksPage = serde_json::from_str(
            r#"{
                "kind": "tasks#tasks",
                "items": [
                    {"id": "t1", "title": "Write report", "status": "needsAction"},
                    {"id": "t2", "title": "ENG-1 Old", "status": "completed", "completed": "2024-01-01T00:00:00.000Z"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].status, TaskStatus::Completed);
        assert!(page.next_page_token.is_none());
    }
}
