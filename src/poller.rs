use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::engine::{Advance, PlayerEngine};

/// Periodic task that detects natural track completion and advances the
/// playlist. One poller per process; `start` is idempotent while a prior
/// task is still live.
pub struct AutoAdvancePoller {
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl AutoAdvancePoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    pub fn start(&mut self, engine: Arc<Mutex<PlayerEngine>>) {
        if self.is_running() {
            debug!("auto-advance poller already running");
            return;
        }

        let interval = self.interval;
        info!("starting auto-advance poller ({}ms interval)", interval.as_millis());
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // The lock is taken and released within the tick; it is never
                // held across an await, so ticks cannot overlap.
                let advanced = engine.lock().unwrap().poll_finished();
                match advanced {
                    Some(Advance::Playing(name)) => info!("auto-advanced to {}", name),
                    Some(Advance::EndOfPlaylist) => info!("playlist finished"),
                    _ => {}
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("auto-advance poller stopped");
        }
    }
}

impl Drop for AutoAdvancePoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
