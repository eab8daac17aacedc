//! Periodic auto-save loop.
//!
//! Commits an `auto = true` snapshot of the active project on a fixed
//! cadence, whether or not its content changed since the last snapshot.
//! The loop always reads the latest committed project through the
//! shared session, so a tick that races a user edit snapshots the state
//! the edit produced.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::session::Session;

/// Runs the auto-save loop until the task is dropped.
pub async fn run_autosave(session: Arc<Mutex<Session>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // Skip the immediate first tick; the opening commit already
    // captured the initial state.
    ticker.tick().await;
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let mut session = session.lock().await;
        match session.autosave_commit() {
            Some(snapshot) => debug!(snapshot = %snapshot, "auto-save snapshot committed"),
            None => debug!("auto-save skipped, no project or recording paused"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
