//! Periodic growth re-evaluation.
//!
//! Runs [`Garden::tick_growth`] once immediately and then on a fixed
//! cadence, independent of user actions. The cadence is injected; "now"
//! comes from the garden's clock, so tests drive both deterministically.

use crate::garden::{Garden, StageChange};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running growth loop. The loop stops when this is dropped.
pub struct GrowthLoop {
    handle: JoinHandle<()>,
}

impl GrowthLoop {
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for GrowthLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the growth loop on the current Tokio runtime.
///
/// Stage changes are forwarded to `changes` when given. A failed save is
/// logged and retried on the next tick, not treated as fatal.
pub fn spawn_growth_loop(
    garden: Garden,
    every: Duration,
    changes: Option<mpsc::UnboundedSender<StageChange>>,
) -> GrowthLoop {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match garden.tick_growth() {
                Ok(moved) => {
                    if let Some(tx) = &changes {
                        for change in moved {
                            if tx.send(change).is_err() {
                                tracing::debug!("growth listener went away");
                                break;
                            }
                        }
                    }
                }
                Err(e) => tracing::error!(error = %e, "growth check failed"),
            }
        }
    });
    GrowthLoop { handle }
}
