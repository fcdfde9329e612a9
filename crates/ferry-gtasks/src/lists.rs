//! Task list resources.

use serde::Deserialize;

use crate::{MAX_RESULTS, TasksClient, error::TasksError};

/// A task list (the service's `tasks#taskList` resource).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskList {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskListsPage {
    #[serde(default)]
    items: Vec<TaskList>,
    next_page_token: Option<String>,
}

impl TasksClient {
    /// All task lists of the authorized user, following pagination.
    ///
    /// # Errors
    ///
    /// Returns [`TasksError`] if a request fails or the service returns a
    /// non-success status.
    pub async fn list_task_lists(&self) -> Result<Vec<TaskList>, TasksError> {
        let url = self.url("/users/@me/lists");
        let mut lists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let resp = self
                .send(|http| {
                    let request = http.get(&url).query(&[("maxResults", MAX_RESULTS)]);
                    match &page_token {
                        Some(token) => request.query(&[("pageToken", token)]),
                        None => request,
                    }
                })
                .await?;
            let page: TaskListsPage = resp.json().await?;
            lists.extend(page.items);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = lists.len(), "fetched task lists");
        Ok(lists)
    }

    /// The first task list whose title is exactly `title`.
    ///
    /// # Errors
    ///
    /// See [`Self::list_task_lists`].
    pub async fn find_task_list(&self, title: &str) -> Result<Option<TaskList>, TasksError> {
        Ok(self
            .list_task_lists()
            .await?
            .into_iter()
            .find(|list| list.title == title))
    }
}
