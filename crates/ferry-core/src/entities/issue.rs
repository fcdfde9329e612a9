use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An issue assigned to the user in the tracker, as seen on one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable short code, e.g. `ENG-123`. The join key against task titles.
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Id of the user who snoozed the issue, if any.
    pub snoozed_by: Option<String>,
    pub due_date: Option<NaiveDate>,
}
