//! Fan-out of chat mutations to registered listeners.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::error::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Create a task from free text.
    Add,
    /// Complete the task with the given id.
    Done,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Done => "done",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusEvent {
    pub kind: EventKind,
    pub value: String,
}

impl BusEvent {
    pub fn add(text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Add,
            value: text.into(),
        }
    }

    pub fn done(task_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Done,
            value: task_id.into(),
        }
    }
}

#[async_trait]
pub trait Listener: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    async fn handle(&self, event: &BusEvent) -> Result<(), SyncError>;
}

/// How a publish went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub delivered: usize,
    pub failed: usize,
}

/// Ordered, append-only set of listeners.
#[derive(Default)]
pub struct ListenerBus {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
}

impl ListenerBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, listener: Arc<dyn Listener>) {
        let mut listeners = self.listeners.write().await;
        debug!(
            listener = listener.name(),
            total = listeners.len() + 1,
            "listener registered"
        );
        listeners.push(listener);
    }

    /// Run every listener concurrently on `event` and wait for all of them.
    ///
    /// Listener errors are logged and counted; they never reach the caller.
    pub async fn publish(&self, event: BusEvent) -> PublishOutcome {
        let listeners = self.listeners.read().await.clone();
        if listeners.is_empty() {
            warn!(kind = %event.kind, "event published with no listeners registered");
            return PublishOutcome::default();
        }
        debug!(kind = %event.kind, listeners = listeners.len(), "publishing event");
        let results = join_all(listeners.iter().map(|listener| listener.handle(&event))).await;

        let mut outcome = PublishOutcome::default();
        for (listener, result) in listeners.iter().zip(results) {
            match result {
                Ok(()) => outcome.delivered += 1,
                Err(e) => {
                    outcome.failed += 1;
                    error!(
                        listener = listener.name(),
                        kind = %event.kind,
                        value = %event.value,
                        error = %e,
                        "listener failed"
                    );
                }
            }
        }
        outcome
    }
}
