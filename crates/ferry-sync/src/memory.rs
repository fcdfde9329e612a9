//! In-memory port implementations for tests and local runs.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use ferry_core::entities::{Issue, Task, TaskDraft};
use ferry_core::enums::TaskStatus;
use ferry_core::errors::CoreError;

use crate::error::SyncError;
use crate::ports::{IssueSource, MessageSink, TaskService};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Task-list service backed by a `HashMap`.
///
/// Ids are assigned sequentially (`t1`, `t2`, ...). Titles registered with
/// [`fail_inserts_titled`](Self::fail_inserts_titled) make inserts fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskService {
    state: Arc<Mutex<MemoryTaskState>>,
}

#[derive(Debug, Default)]
struct MemoryTaskState {
    lists: Vec<(String, String)>,
    tasks: HashMap<String, Vec<Task>>,
    next_id: u64,
    failing_titles: HashSet<String>,
    fail_lists_after_insert: bool,
    inserts: Vec<TaskDraft>,
    updates: Vec<Task>,
}

impl MemoryTaskService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty list and return its id.
    pub fn add_list(&self, title: &str) -> String {
        let mut state = lock(&self.state);
        let id = format!("list-{}", state.lists.len() + 1);
        state.lists.push((id.clone(), title.to_string()));
        state.tasks.insert(id.clone(), Vec::new());
        id
    }

    /// Put an existing task into a list, bypassing insert bookkeeping.
    pub fn seed(&self, list_id: &str, task: Task) {
        lock(&self.state)
            .tasks
            .entry(list_id.to_string())
            .or_default()
            .push(task);
    }

    pub fn fail_inserts_titled(&self, title: &str) {
        lock(&self.state).failing_titles.insert(title.to_string());
    }

    /// Make `list_tasks` fail once any insert has succeeded.
    pub fn fail_lists_after_insert(&self) {
        lock(&self.state).fail_lists_after_insert = true;
    }

    #[must_use]
    pub fn tasks(&self, list_id: &str) -> Vec<Task> {
        lock(&self.state)
            .tasks
            .get(list_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every successful insert, in call order.
    #[must_use]
    pub fn inserts(&self) -> Vec<TaskDraft> {
        lock(&self.state).inserts.clone()
    }

    /// Every update payload, in call order.
    #[must_use]
    pub fn updates(&self) -> Vec<Task> {
        lock(&self.state).updates.clone()
    }
}

#[async_trait]
impl TaskService for MemoryTaskService {
    async fn find_list(&self, title: &str) -> Result<Option<String>, SyncError> {
        Ok(lock(&self.state)
            .lists
            .iter()
            .find(|(_, list_title)| list_title == title)
            .map(|(id, _)| id.clone()))
    }

    async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>, SyncError> {
        let state = lock(&self.state);
        if state.fail_lists_after_insert && !state.inserts.is_empty() {
            return Err(CoreError::Validation(format!("listing of '{list_id}' refused")).into());
        }
        Ok(state.tasks.get(list_id).cloned().unwrap_or_default())
    }

    async fn insert_task(&self, list_id: &str, draft: &TaskDraft) -> Result<Task, SyncError> {
        let mut state = lock(&self.state);
        if state.failing_titles.contains(&draft.title) {
            return Err(CoreError::Validation(format!("insert of '{}' refused", draft.title)).into());
        }
        state.next_id += 1;
        let task = Task {
            id: format!("t{}", state.next_id),
            title: draft.title.clone(),
            notes: draft.notes.clone(),
            due: draft.due,
            status: TaskStatus::NeedsAction,
            ..Task::default()
        };
        state
            .tasks
            .entry(list_id.to_string())
            .or_default()
            .push(task.clone());
        state.inserts.push(draft.clone());
        Ok(task)
    }

    async fn update_task(&self, list_id: &str, task: &Task) -> Result<Task, SyncError> {
        let mut state = lock(&self.state);
        state.updates.push(task.clone());
        let slot = state
            .tasks
            .get_mut(list_id)
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task.id))
            .ok_or_else(|| SyncError::TaskNotFound(task.id.clone()))?;
        *slot = task.clone();
        Ok(task.clone())
    }
}

/// Issue source returning a fixed set of issues.
#[derive(Debug, Clone, Default)]
pub struct StaticIssues {
    issues: Vec<Issue>,
}

impl StaticIssues {
    #[must_use]
    pub const fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

#[async_trait]
impl IssueSource for StaticIssues {
    async fn assigned_issues(&self) -> Result<Vec<Issue>, SyncError> {
        Ok(self.issues.clone())
    }
}

/// Message sink that records bodies instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

#[derive(Debug, Default)]
struct SinkState {
    sent: Vec<String>,
    fail_next: bool,
}

impl RecordingSink {
    /// Bodies delivered so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    /// Make the next send fail.
    pub fn fail_next(&self) {
        lock(&self.state).fail_next = true;
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_markdown(&self, text: &str) -> Result<(), SyncError> {
        let mut state = lock(&self.state);
        if std::mem::take(&mut state.fail_next) {
            return Err(SyncError::Chat("send refused".into()));
        }
        state.sent.push(text.to_string());
        Ok(())
    }
}
