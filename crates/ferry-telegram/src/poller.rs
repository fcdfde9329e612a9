//! Long-poll loop feeding updates into the front-end.

use std::time::Duration;

use tracing::{debug, error, warn};

use crate::client::BotClient;
use crate::error::TelegramError;
use crate::front::ChatFrontEnd;

/// Delay before polling again after a failed `getUpdates`.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll for updates forever, handing every message to `front`.
///
/// Failures are logged; the loop only ends when its task is dropped.
pub async fn run_polling(client: &BotClient, front: &ChatFrontEnd, poll_timeout_secs: u64) {
    let mut offset = 0;
    loop {
        match client.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => {
                debug!(count = updates.len(), offset, "updates received");
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    let Some(message) = update.message else {
                        continue;
                    };
                    if let Err(e) = front.handle_message(&message).await {
                        error!(error = %e, message_id = message.message_id, "handling message failed");
                    }
                }
            }
            Err(TelegramError::RateLimited { retry_after_secs }) => {
                warn!(retry_after_secs, "getUpdates rate limited");
                tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
            }
            Err(e) => {
                error!(error = %e, retry_in = ?RETRY_DELAY, "getUpdates failed");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
