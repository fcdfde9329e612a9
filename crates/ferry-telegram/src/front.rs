//! Owner-only chat front-end: routes messages to the bus and the board.

use std::sync::Arc;

use ferry_sync::SyncError;
use ferry_sync::bus::{BusEvent, ListenerBus};
use ferry_sync::notify::TaskBoard;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::types::Message;

pub struct ChatFrontEnd {
    owner_id: i64,
    bus: Arc<ListenerBus>,
    board: Arc<TaskBoard>,
}

impl ChatFrontEnd {
    pub fn new(owner_id: i64, bus: Arc<ListenerBus>, board: Arc<TaskBoard>) -> Self {
        Self {
            owner_id,
            bus,
            board,
        }
    }

    /// Handle one incoming message.
    ///
    /// Messages from anyone but the owner are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns the sink error when re-sending the task list fails. Listener
    /// failures are logged by the bus and not returned.
    pub async fn handle_message(&self, message: &Message) -> Result<(), SyncError> {
        let sender = message.sender_id();
        if sender != Some(self.owner_id) {
            warn!(
                sender = ?sender,
                text = message.text.as_deref().unwrap_or_default(),
                "message from non-owner dropped"
            );
            return Ok(());
        }
        let Some(text) = message.text.as_deref() else {
            debug!(message_id = message.message_id, "message without text ignored");
            return Ok(());
        };
        info!(text, "message from owner");

        match Command::parse(text) {
            Command::Show => {}
            Command::Done(id) => {
                self.bus.publish(BusEvent::done(id)).await;
            }
            Command::Add(text) => {
                self.bus.publish(BusEvent::add(text)).await;
            }
            Command::Ignore => {
                debug!(text, "unknown command ignored");
                return Ok(());
            }
        }
        self.board.resend().await
    }
}
