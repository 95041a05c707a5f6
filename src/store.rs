use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::SessionConfig;
use crate::scheduler::Scheduler;
use crate::session::SessionHandle;
use crate::tracker::TaskTracker;

// In-memory state for the lifetime of the process; nothing is persisted.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<TaskTracker>>,
    pub session: SessionHandle,
}

impl AppState {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_scheduler(Scheduler::new(config))
    }

    pub fn with_scheduler(scheduler: Scheduler) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(TaskTracker::new())),
            session: SessionHandle::new(scheduler),
        }
    }

    // Seed the task list in order; blank titles are skipped like any add.
    pub fn seed_tasks<I, S>(&self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracker = self.tracker.lock();
        for title in titles {
            tracker.add_task(title.as_ref());
        }
    }
}
