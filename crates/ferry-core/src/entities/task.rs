use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::due::{default_due_date, resolve_due_date};
use crate::entities::Issue;
use crate::enums::TaskStatus;
use crate::errors::CoreError;

/// A task in the task-list service.
///
/// Unknown fields returned by the service are kept in `extra` and written back
/// verbatim on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, with = "super::due_format", skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// The same task marked completed; every other field is left untouched.
    #[must_use]
    pub fn into_completed(self) -> Self {
        Self {
            status: TaskStatus::Completed,
            ..self
        }
    }
}

/// Payload for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "super::due_format", skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
}

impl TaskDraft {
    /// Task mirroring a tracker issue: `"<identifier> <title>"`, the issue URL
    /// as notes, and the issue's due date or the default one.
    #[must_use]
    pub fn for_issue(issue: &Issue, today: NaiveDate) -> Self {
        Self {
            title: format!("{} {}", issue.identifier, issue.title),
            notes: Some(issue.url.clone()),
            due: Some(resolve_due_date(issue, today)),
        }
    }

    /// Task typed by the user: first line is the title, the rest are notes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the first line is blank.
    pub fn from_message(text: &str, today: NaiveDate) -> Result<Self, CoreError> {
        let mut lines = text.lines();
        let title = lines
            .next()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| CoreError::Validation("task title is empty".into()))?;

        let notes = lines.collect::<Vec<_>>().join("\n");
        let notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };

        Ok(Self {
            title: title.to_string(),
            notes,
            due: Some(default_due_date(today)),
        })
    }
}
