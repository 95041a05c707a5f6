use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConfigError;

pub const FOCUS_CHOICES: [u32; 6] = [15, 20, 25, 30, 45, 60];
pub const BREAK_CHOICES: [u32; 4] = [5, 10, 15, 20];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String, // trimmed, never empty
    pub completed: bool,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64, // 0..=100
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus Time",
            Phase::Break => "Break Time",
        }
    }
}

// Focus length in minutes, restricted to FOCUS_CHOICES
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub struct FocusMinutes(u32);

impl FocusMinutes {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FocusMinutes {
    fn default() -> Self {
        FocusMinutes(25)
    }
}

impl TryFrom<u32> for FocusMinutes {
    type Error = ConfigError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        if FOCUS_CHOICES.contains(&minutes) {
            Ok(FocusMinutes(minutes))
        } else {
            Err(ConfigError::InvalidFocusMinutes(minutes))
        }
    }
}

impl From<FocusMinutes> for u32 {
    fn from(m: FocusMinutes) -> u32 {
        m.0
    }
}

// Break length in minutes, restricted to BREAK_CHOICES
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub struct BreakMinutes(u32);

impl BreakMinutes {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BreakMinutes {
    fn default() -> Self {
        BreakMinutes(5)
    }
}

impl TryFrom<u32> for BreakMinutes {
    type Error = ConfigError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        if BREAK_CHOICES.contains(&minutes) {
            Ok(BreakMinutes(minutes))
        } else {
            Err(ConfigError::InvalidBreakMinutes(minutes))
        }
    }
}

impl From<BreakMinutes> for u32 {
    fn from(m: BreakMinutes) -> u32 {
        m.0
    }
}

// Number of focus sessions in one full cycle, always >= 1
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub struct SessionCount(u32);

impl SessionCount {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SessionCount {
    fn default() -> Self {
        SessionCount(4)
    }
}

impl TryFrom<u32> for SessionCount {
    type Error = ConfigError;

    fn try_from(sessions: u32) -> Result<Self, Self::Error> {
        if sessions >= 1 {
            Ok(SessionCount(sessions))
        } else {
            Err(ConfigError::InvalidSessionCount)
        }
    }
}

impl From<SessionCount> for u32 {
    fn from(s: SessionCount) -> u32 {
        s.0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub focus_minutes: FocusMinutes,
    pub break_minutes: BreakMinutes,
    pub total_sessions: SessionCount,
}

impl SessionConfig {
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes.get() * 60,
            Phase::Break => self.break_minutes.get() * 60,
        }
    }
}

// Read-only view of the scheduler handed to the host
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerState {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub session_index: u32,
    pub total_sessions: u32,
    pub display_time: String, // "MM:SS"
    pub break_message: String,
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// Local -> FixedOffset (current system offset)
pub fn now_fixed_offset() -> DateTime<FixedOffset> {
    let local = chrono::Local::now();
    let offset_seconds = local.offset().local_minus_utc();
    match FixedOffset::east_opt(offset_seconds) {
        Some(fixed) => local.with_timezone(&fixed),
        None => Utc::now().fixed_offset(),
    }
}
