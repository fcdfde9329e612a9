//! Which tracker issues deserve a task.
//!
//! An issue is relevant when all of these hold:
//! - it was updated within the lookback window (14 days by default),
//! - nobody snoozed it,
//! - it is not completed.

use chrono::{DateTime, TimeDelta, Utc};

use crate::entities::Issue;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    lookback: TimeDelta,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_DAYS)
    }
}

impl RelevanceFilter {
    #[must_use]
    pub fn new(lookback_days: u32) -> Self {
        Self {
            lookback: TimeDelta::days(i64::from(lookback_days)),
        }
    }

    #[must_use]
    pub fn is_relevant(&self, issue: &Issue, now: DateTime<Utc>) -> bool {
        issue.updated_at > now - self.lookback
            && issue.snoozed_by.is_none()
            && issue.completed_at.is_none()
    }

    /// Relevant issues, in input order.
    #[must_use]
    pub fn apply(&self, issues: Vec<Issue>, now: DateTime<Utc>) -> Vec<Issue> {
        issues
            .into_iter()
            .filter(|issue| self.is_relevant(issue, now))
            .collect()
    }
}
