//! One reconciliation pass: mirror relevant tracker issues into the task list.

use std::sync::Arc;

use ferry_core::clock::Clock;
use ferry_core::entities::{Task, TaskDraft};
use ferry_core::linking::unlinked;
use ferry_core::relevance::RelevanceFilter;
use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};

use crate::error::SyncError;
use crate::list::ScopedList;
use crate::notify::{TaskBoard, render};
use crate::ports::IssueSource;

/// An issue whose task could not be created.
#[derive(Debug)]
pub struct CreateFailure {
    pub identifier: String,
    pub error: SyncError,
}

/// What a pass did.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub list_id: String,
    pub fetched_tasks: usize,
    pub fetched_issues: usize,
    pub relevant: usize,
    pub created: Vec<Task>,
    pub failures: Vec<CreateFailure>,
    /// Whether the board sent a message.
    pub notified: bool,
}

pub struct Reconciler {
    list: ScopedList,
    issues: Arc<dyn IssueSource>,
    board: Arc<TaskBoard>,
    clock: Arc<dyn Clock>,
    filter: RelevanceFilter,
    max_concurrent: usize,
}

impl Reconciler {
    pub fn new(
        list: ScopedList,
        issues: Arc<dyn IssueSource>,
        board: Arc<TaskBoard>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            list,
            issues,
            board,
            clock,
            filter: RelevanceFilter::default(),
            max_concurrent: 4,
        }
    }

    #[must_use]
    pub const fn with_filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Upper bound on task inserts in flight; zero is treated as one.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Run one pass.
    ///
    /// A failed insert is logged and recorded in the report; it does not stop
    /// the other inserts nor the board refresh.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ListNotFound`] when the list is missing, and the
    /// client error when the first task listing, the issue fetch, or the board
    /// update fails. Once tasks have been created the report is always
    /// returned, even if the list cannot be read again.
    pub async fn run_once(&self) -> Result<SyncReport, SyncError> {
        let list_id = self.list.resolve().await?;
        let service = self.list.service();

        let tasks = service.list_tasks(&list_id).await?;
        let fetched_tasks = tasks.len();
        let issues = self.issues.assigned_issues().await?;
        let fetched_issues = issues.len();

        let relevant = self.filter.apply(issues, self.clock.now());
        let missing = unlinked(&relevant, &tasks);
        let today = self.clock.today();

        let inserts: Vec<_> = missing
            .into_iter()
            .map(|issue| {
                let draft = TaskDraft::for_issue(issue, today);
                let list_id = list_id.as_str();
                async move {
                    let result = service.insert_task(list_id, &draft).await;
                    (issue.identifier.clone(), result)
                }
            })
            .collect();
        let results: Vec<_> = stream::iter(inserts)
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut created = Vec::new();
        let mut failures = Vec::new();
        for (identifier, result) in results {
            match result {
                Ok(task) => {
                    info!(issue = %identifier, task_id = %task.id, "task created");
                    created.push(task);
                }
                Err(e) => {
                    warn!(issue = %identifier, error = %e, "task creation failed");
                    failures.push(CreateFailure {
                        identifier,
                        error: e,
                    });
                }
            }
        }

        let current = if created.is_empty() {
            tasks
        } else {
            match service.list_tasks(&list_id).await {
                Ok(current) => current,
                Err(e) => {
                    warn!(error = %e, "re-listing tasks after creates failed; rendering from the earlier listing");
                    tasks.into_iter().chain(created.iter().cloned()).collect()
                }
            }
        };
        let notified = self.board.update(render(&current)).await?;

        Ok(SyncReport {
            list_id,
            fetched_tasks,
            fetched_issues,
            relevant: relevant.len(),
            created,
            failures,
            notified,
        })
    }

    /// Run one pass and log the outcome.
    pub async fn tick(&self) {
        match self.run_once().await {
            Ok(report) => info!(
                list = %self.list.title(),
                tasks = report.fetched_tasks,
                issues = report.fetched_issues,
                relevant = report.relevant,
                created = report.created.len(),
                failed = report.failures.len(),
                notified = report.notified,
                "sync complete"
            ),
            Err(e) => error!(list = %self.list.title(), error = %e, "sync failed"),
        }
    }
}
