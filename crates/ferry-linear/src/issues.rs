//! `viewer.assignedIssues`: every issue assigned to the API key's owner.

use chrono::{DateTime, NaiveDate, Utc};
use ferry_core::entities::Issue;
use serde::{Deserialize, Serialize};

use crate::{LinearClient, error::LinearError};

const ASSIGNED_ISSUES_QUERY: &str = r"
query AssignedIssues($first: Int!, $after: String) {
  viewer {
    assignedIssues(first: $first, after: $after) {
      nodes {
        identifier
        title
        url
        updatedAt
        completedAt
        dueDate
        snoozedBy { id }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
";

#[derive(Serialize)]
struct Variables<'a> {
    first: u32,
    after: Option<&'a str>,
}

#[derive(Deserialize)]
struct Data {
    viewer: Viewer,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Viewer {
    assigned_issues: IssueConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueConnection {
    nodes: Vec<IssueNode>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    identifier: String,
    title: String,
    url: String,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    due_date: Option<NaiveDate>,
    snoozed_by: Option<UserRef>,
}

#[derive(Deserialize)]
struct UserRef {
    id: String,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Self {
            identifier: node.identifier,
            title: node.title,
            url: node.url,
            updated_at: node.updated_at,
            completed_at: node.completed_at,
            snoozed_by: node.snoozed_by.map(|user| user.id),
            due_date: node.due_date,
        }
    }
}

impl LinearClient {
    /// All issues assigned to the viewer, following cursor pagination.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError`] if a request fails, Linear reports GraphQL
    /// errors (bad API key, rate limit), or the response cannot be parsed.
    pub async fn assigned_issues(&self) -> Result<Vec<Issue>, LinearError> {
        let mut issues = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let data: Data = self
                .query(
                    ASSIGNED_ISSUES_QUERY,
                    Variables {
                        first: self.page_size,
                        after: after.as_deref(),
                    },
                )
                .await?;
            let connection = data.viewer.assigned_issues;
            issues.extend(connection.nodes.into_iter().map(Issue::from));

            match connection.page_info.end_cursor {
                Some(cursor) if connection.page_info.has_next_page => after = Some(cursor),
                _ => break,
            }
        }

        tracing::debug!(count = issues.len(), "fetched assigned issues");
        Ok(issues)
    }
}
