/*
Periodic tick source for the session scheduler.
A Ticker is a scoped handle: dropping it aborts the background task.
*/

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::session::FocusSession;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a task that delivers one tick per `period` to `session`,
    /// starting one period from now. The task ends on its own once the
    /// session reports it is no longer counting down, or once the
    /// session has been dropped.
    pub fn spawn(session: Weak<Mutex<FocusSession>>, epoch: u64, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(session) = session.upgrade() else {
                    break;
                };
                if !session.lock().on_tick(epoch) {
                    break;
                }
            }
        });

        tracing::debug!(epoch, "timer armed");
        Self { epoch, handle }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(epoch = self.epoch, "timer disarmed");
    }
}
