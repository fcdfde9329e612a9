//! Periodic reconciliation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::reconcile::Reconciler;

/// Run `reconciler` now and then every `period`, until the handle is aborted.
///
/// Each pass runs on its own task, so a slow pass does not delay the next one
/// and two passes may overlap.
pub fn spawn_periodic(reconciler: Arc<Reconciler>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            debug!(period_secs = period.as_secs(), "sync tick");
            let reconciler = Arc::clone(&reconciler);
            tokio::spawn(async move { reconciler.tick().await });
        }
    })
}
