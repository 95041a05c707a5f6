/*
Session host: owns the scheduler together with its tick source.
Every public operation takes the lock once and runs to completion, so the
scheduler only ever has a single writer.
*/

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::models::{BreakMinutes, FocusMinutes, Phase, SchedulerState, SessionCount};
use crate::scheduler::{Scheduler, Tick};
use crate::timer::{Ticker, TICK_PERIOD};

const FOCUS_HINT: &str = "Focus on your current task without distractions";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub state: SchedulerState,
    pub phase_label: &'static str,
    pub hint: String,
    pub cycles_completed: u64,
}

pub struct FocusSession {
    scheduler: Scheduler,
    ticker: Option<Ticker>,
    epoch: u64,
    cycles_completed: u64,
}

impl FocusSession {
    fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            ticker: None,
            epoch: 0,
            cycles_completed: 0,
        }
    }

    /// Called by the ticker. Returns whether the ticker should keep going.
    pub(crate) fn on_tick(&mut self, epoch: u64) -> bool {
        if self.ticker.as_ref().map(Ticker::epoch) != Some(epoch) {
            tracing::trace!(epoch, current = self.epoch, "stale tick ignored");
            return false;
        }

        match self.scheduler.tick() {
            Tick::Idle => {}
            Tick::Counted => return true,
            Tick::BreakStarted => {
                let st = self.scheduler.state();
                tracing::info!(
                    session = st.session_index,
                    break_message = %st.break_message,
                    "focus finished, break ready"
                );
            }
            Tick::FocusStarted { session } => {
                tracing::info!(session, "break finished, next focus session ready");
            }
            Tick::CycleComplete => {
                self.cycles_completed += 1;
                tracing::info!(
                    cycles_completed = self.cycles_completed,
                    "all sessions complete"
                );
            }
        }

        // Not counting any more; release the handle in this critical section.
        self.ticker = None;
        false
    }

    fn disarm(&mut self) {
        self.ticker = None;
    }

    fn view(&self) -> SessionView {
        let state = self.scheduler.state();
        let hint = match state.phase {
            Phase::Focus => FOCUS_HINT.to_string(),
            Phase::Break => state.break_message.clone(),
        };
        SessionView {
            phase_label: state.phase.label(),
            hint,
            cycles_completed: self.cycles_completed,
            state,
        }
    }
}

/// Cloneable handle shared by the HTTP handlers.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<FocusSession>>,
    period: Duration,
}

impl SessionHandle {
    pub fn new(scheduler: Scheduler) -> Self {
        Self::with_period(scheduler, TICK_PERIOD)
    }

    pub fn with_period(scheduler: Scheduler, period: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FocusSession::new(scheduler))),
            period,
        }
    }

    pub fn snapshot(&self) -> SessionView {
        self.inner.lock().view()
    }

    /// Start or pause. Must be called from within a Tokio runtime.
    pub fn toggle_running(&self) -> SessionView {
        let mut s = self.inner.lock();
        s.scheduler.toggle_running();

        // Release any previous handle before acquiring a new one.
        s.disarm();
        if s.scheduler.is_running() {
            s.epoch += 1;
            s.ticker = Some(Ticker::spawn(
                Arc::downgrade(&self.inner),
                s.epoch,
                self.period,
            ));
        }
        tracing::info!(running = s.scheduler.is_running(), "session toggled");
        s.view()
    }

    pub fn reset(&self) -> SessionView {
        let mut s = self.inner.lock();
        s.disarm();
        s.scheduler.reset();
        tracing::info!("session reset");
        s.view()
    }

    pub fn update_focus_minutes(&self, minutes: FocusMinutes) -> SessionView {
        let mut s = self.inner.lock();
        s.scheduler.update_focus_minutes(minutes);
        tracing::info!(minutes = minutes.get(), "focus duration updated");
        s.view()
    }

    pub fn update_break_minutes(&self, minutes: BreakMinutes) -> SessionView {
        let mut s = self.inner.lock();
        s.scheduler.update_break_minutes(minutes);
        tracing::info!(minutes = minutes.get(), "break duration updated");
        s.view()
    }

    pub fn update_total_sessions(&self, sessions: SessionCount) -> SessionView {
        let mut s = self.inner.lock();
        s.scheduler.update_total_sessions(sessions);
        tracing::info!(sessions = sessions.get(), "total sessions updated");
        s.view()
    }

    /// Disarm the timer. Called when the host shuts down.
    pub fn teardown(&self) {
        self.inner.lock().disarm();
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.inner.lock().ticker.is_some()
    }

    #[cfg(test)]
    fn deliver_tick(&self, epoch: u64) -> bool {
        self.inner.lock().on_tick(epoch)
    }

    #[cfg(test)]
    fn epoch(&self) -> u64 {
        self.inner.lock().epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionConfig;
    use crate::scheduler::MessagePicker;

    struct Fixed;

    impl MessagePicker for Fixed {
        fn pick(&mut self) -> String {
            "breathe".to_string()
        }
    }

    fn handle(focus: u32, brk: u32, total: u32) -> SessionHandle {
        let config = SessionConfig {
            focus_minutes: FocusMinutes::try_from(focus).unwrap(),
            break_minutes: BreakMinutes::try_from(brk).unwrap(),
            total_sessions: SessionCount::try_from(total).unwrap(),
        };
        SessionHandle::new(Scheduler::with_picker(config, Box::new(Fixed)))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let h = handle(25, 5, 1);
        h.toggle_running();
        assert!(h.is_armed());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(h.snapshot().state.remaining_seconds, 1497);
        assert_eq!(h.snapshot().state.display_time, "24:57");
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticks() {
        let h = handle(25, 5, 1);
        h.toggle_running();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let paused = h.toggle_running();
        assert!(!paused.state.running);
        assert!(!h.is_armed());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(h.snapshot().state.remaining_seconds, 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn focus_completion_disarms_and_loads_break() {
        let h = handle(15, 5, 1);
        h.toggle_running();
        tokio::time::sleep(Duration::from_secs(900) + Duration::from_millis(500)).await;

        let v = h.snapshot();
        assert_eq!(v.state.phase, Phase::Break);
        assert_eq!(v.state.remaining_seconds, 300);
        assert!(!v.state.running);
        assert_eq!(v.hint, "breathe");
        assert_eq!(v.phase_label, "Break Time");
        assert!(!h.is_armed());

        // Nothing moves until the user starts the break.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(h.snapshot().state.remaining_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_counts_completion() {
        let h = handle(15, 5, 1);
        h.toggle_running();
        tokio::time::sleep(Duration::from_millis(900_500)).await;
        h.toggle_running();
        tokio::time::sleep(Duration::from_millis(300_500)).await;

        let v = h.snapshot();
        assert_eq!(v.cycles_completed, 1);
        assert_eq!(v.state.phase, Phase::Focus);
        assert_eq!(v.state.remaining_seconds, 900);
        assert_eq!(v.state.session_index, 1);
        assert!(!v.state.running);
        assert_eq!(v.hint, FOCUS_HINT);
    }

    #[tokio::test]
    async fn stale_epoch_tick_is_ignored() {
        let h = handle(25, 5, 1);
        h.toggle_running();
        let first = h.epoch();
        h.toggle_running();
        h.toggle_running();
        assert_eq!(h.epoch(), first + 1);

        assert!(!h.deliver_tick(first));
        assert_eq!(h.snapshot().state.remaining_seconds, 1500);

        assert!(h.deliver_tick(first + 1));
        assert_eq!(h.snapshot().state.remaining_seconds, 1499);
    }

    #[tokio::test]
    async fn reset_disarms_timer() {
        let h = handle(25, 5, 2);
        h.toggle_running();
        let epoch = h.epoch();
        h.deliver_tick(epoch);

        let v = h.reset();
        assert!(!h.is_armed());
        assert!(!v.state.running);
        assert_eq!(v.state.remaining_seconds, 1500);
        assert!(!h.deliver_tick(epoch));
    }

    #[tokio::test]
    async fn focus_update_respects_running_flag() {
        let h = handle(25, 5, 2);
        let v = h.update_focus_minutes(FocusMinutes::try_from(45).unwrap());
        assert_eq!(v.state.remaining_seconds, 2700);

        h.toggle_running();
        let epoch = h.epoch();
        h.deliver_tick(epoch);
        let v = h.update_focus_minutes(FocusMinutes::try_from(15).unwrap());
        assert_eq!(v.state.remaining_seconds, 2699);
        assert_eq!(v.state.focus_minutes, 15);
    }

    #[tokio::test]
    async fn teardown_disarms() {
        let h = handle(25, 5, 1);
        h.toggle_running();
        h.teardown();
        assert!(!h.is_armed());
    }
}
