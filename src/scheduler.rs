/*
Focus / break session state machine.
Driven entirely by method calls: the tick source lives in timer.rs and
the break message is chosen by an injected MessagePicker, so every
transition here is deterministic under test.
*/

use rand::seq::SliceRandom;

use crate::models::{
    format_mmss, BreakMinutes, FocusMinutes, Phase, SchedulerState, SessionConfig, SessionCount,
};

pub const BREAK_MESSAGES: [&str; 6] = [
    "Take a short break and relax",
    "Stand up, stretch, and breathe deeply",
    "Step away from the screen for a moment",
    "Drink some water, you earned it",
    "Let your mind wander for a few minutes",
    "Great focus! Rest your eyes for a bit",
];

/// Chooses the encouragement message shown when a break begins.
pub trait MessagePicker: Send {
    fn pick(&mut self) -> String;
}

/// Uniform choice from [`BREAK_MESSAGES`], with replacement.
#[derive(Debug, Default)]
pub struct RandomMessages;

impl MessagePicker for RandomMessages {
    fn pick(&mut self) -> String {
        let mut rng = rand::thread_rng();
        BREAK_MESSAGES
            .choose(&mut rng)
            .copied()
            .unwrap_or(BREAK_MESSAGES[0])
            .to_string()
    }
}

/// What a single tick did to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running; the tick was ignored.
    Idle,
    /// Counted down one second, phase unchanged.
    Counted,
    /// Focus finished; the break is loaded and paused.
    BreakStarted,
    /// Break finished; the next focus session is loaded and paused.
    FocusStarted { session: u32 },
    /// The last break finished; the scheduler is back at its start state.
    CycleComplete,
}

pub struct Scheduler {
    config: SessionConfig,
    phase: Phase,
    remaining: u32, // seconds left in the current phase
    running: bool,
    session_index: u32, // 1-based
    break_message: String,
    picker: Box<dyn MessagePicker>,
}

impl Scheduler {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_picker(config, Box::new(RandomMessages))
    }

    pub fn with_picker(config: SessionConfig, picker: Box<dyn MessagePicker>) -> Self {
        Self {
            config,
            phase: Phase::Focus,
            remaining: config.duration_secs(Phase::Focus),
            running: false,
            session_index: 1,
            break_message: String::new(),
            picker,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Advance one second. Reaching zero stops the countdown and loads the
    /// next phase in the same step, so `remaining` never goes below zero.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Tick::Counted;
        }

        self.running = false;
        match self.phase {
            Phase::Focus => {
                self.enter(Phase::Break);
                self.break_message = self.picker.pick();
                Tick::BreakStarted
            }
            Phase::Break if self.session_index < self.config.total_sessions.get() => {
                self.session_index += 1;
                self.enter(Phase::Focus);
                Tick::FocusStarted {
                    session: self.session_index,
                }
            }
            Phase::Break => {
                self.reset();
                Tick::CycleComplete
            }
        }
    }

    /// Back to a paused first focus session, using the current durations.
    pub fn reset(&mut self) {
        self.running = false;
        self.session_index = 1;
        self.enter(Phase::Focus);
    }

    pub fn update_focus_minutes(&mut self, minutes: FocusMinutes) {
        self.config.focus_minutes = minutes;
        self.refresh_if_idle(Phase::Focus);
    }

    pub fn update_break_minutes(&mut self, minutes: BreakMinutes) {
        self.config.break_minutes = minutes;
        self.refresh_if_idle(Phase::Break);
    }

    pub fn update_total_sessions(&mut self, sessions: SessionCount) {
        self.config.total_sessions = sessions;
    }

    pub fn state(&self) -> SchedulerState {
        SchedulerState {
            phase: self.phase,
            remaining_seconds: self.remaining,
            running: self.running,
            session_index: self.session_index.min(self.config.total_sessions.get()),
            total_sessions: self.config.total_sessions.get(),
            display_time: format_mmss(self.remaining),
            break_message: self.break_message.clone(),
            focus_minutes: self.config.focus_minutes.get(),
            break_minutes: self.config.break_minutes.get(),
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining = self.config.duration_secs(phase);
    }

    // A running countdown keeps its length; the new value applies on next entry.
    fn refresh_if_idle(&mut self, phase: Phase) {
        if self.phase == phase && !self.running {
            self.remaining = self.config.duration_secs(phase);
        }
    }
}
