//! Status enums for Ferry.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task in the task-list service.
///
/// ```text
/// needsAction → completed
/// ```
///
/// Serialized in the service's own spelling (`needsAction`, `completed`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    NeedsAction,
    Completed,
}

impl TaskStatus {
    /// Return the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeedsAction => "needsAction",
            Self::Completed => "completed",
        }
    }

    /// Whether the task still shows up in the open-task list.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::NeedsAction)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_service_spelling() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::NeedsAction).unwrap(),
            "\"needsAction\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn only_needs_action_is_open() {
        assert!(TaskStatus::NeedsAction.is_open());
        assert!(!TaskStatus::Completed.is_open());
    }
}
