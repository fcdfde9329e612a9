//! Applies chat mutations to the task list.

use std::sync::Arc;

use async_trait::async_trait;
use ferry_core::clock::Clock;
use ferry_core::entities::TaskDraft;
use tracing::{info, warn};

use crate::bus::{BusEvent, EventKind, Listener};
use crate::error::SyncError;
use crate::list::ScopedList;
use crate::notify::TaskBoard;

/// Bus listener that adds and completes tasks, then refreshes the board.
pub struct MutationHandler {
    list: ScopedList,
    board: Arc<TaskBoard>,
    clock: Arc<dyn Clock>,
}

impl MutationHandler {
    pub fn new(list: ScopedList, board: Arc<TaskBoard>, clock: Arc<dyn Clock>) -> Self {
        Self { list, board, clock }
    }

    async fn add(&self, text: &str) -> Result<(), SyncError> {
        let draft = TaskDraft::from_message(text, self.clock.today())?;
        let task = self.list.insert(&draft).await?;
        info!(task_id = %task.id, title = %task.title, "task added from chat");
        Ok(())
    }

    async fn done(&self, task_id: &str) -> Result<(), SyncError> {
        let task = self.list.complete(task_id.trim()).await?;
        info!(task_id = %task.id, title = %task.title, "task completed from chat");
        Ok(())
    }
}

#[async_trait]
impl Listener for MutationHandler {
    fn name(&self) -> &'static str {
        "task-mutations"
    }

    async fn handle(&self, event: &BusEvent) -> Result<(), SyncError> {
        match event.kind {
            EventKind::Add => self.add(&event.value).await?,
            EventKind::Done => self.done(&event.value).await?,
        }
        if let Err(e) = self.board.refresh_from(&self.list).await {
            warn!(error = %e, "task board refresh after mutation failed");
        }
        Ok(())
    }
}
