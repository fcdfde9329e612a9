//! The join between tracker issues and task-list tasks.
//!
//! There is no foreign key: a task is linked to an issue when the task title
//! contains the issue identifier.

use crate::entities::{Issue, Task};

#[must_use]
pub fn is_linked(task: &Task, issue: &Issue) -> bool {
    task.title.contains(&issue.identifier)
}

/// Issues with no linked task, in input order.
#[must_use]
pub fn unlinked<'a>(issues: &'a [Issue], tasks: &[Task]) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| !tasks.iter().any(|task| is_linked(task, issue)))
        .collect()
}
