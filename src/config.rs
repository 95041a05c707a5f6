/*
Command-line / environment configuration.
Every flag can also be set through an environment variable; flags win.
Durations are validated here so the scheduler only ever sees values
from the enumerated choices.
*/

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::models::{BreakMinutes, FocusMinutes, SessionConfig, SessionCount};

#[derive(Debug, Parser)]
#[command(name = "focus_companion", about = "Task list and focus/break session timer")]
pub struct Args {
    /// Address the HTTP API listens on.
    #[arg(long, env = "FOCUS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Focus length in minutes (15, 20, 25, 30, 45 or 60).
    #[arg(long, env = "FOCUS_MINUTES", default_value_t = 25)]
    pub focus_minutes: u32,

    /// Break length in minutes (5, 10, 15 or 20).
    #[arg(long, env = "FOCUS_BREAK_MINUTES", default_value_t = 5)]
    pub break_minutes: u32,

    /// Focus sessions per full cycle.
    #[arg(long, env = "FOCUS_SESSIONS", default_value_t = 4)]
    pub sessions: u32,

    /// Directory served at `/`.
    #[arg(long, env = "FOCUS_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "FOCUS_LOG", default_value = "info")]
    pub log_level: String,

    /// Task to add at startup. May be repeated.
    #[arg(long = "task", value_name = "TITLE")]
    pub tasks: Vec<String>,
}

/// Fully validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub session: SessionConfig,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub tasks: Vec<String>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let bind = args
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(args.bind.clone()))?;

        let session = SessionConfig {
            focus_minutes: FocusMinutes::try_from(args.focus_minutes)?,
            break_minutes: BreakMinutes::try_from(args.break_minutes)?,
            total_sessions: SessionCount::try_from(args.sessions)?,
        };

        Ok(Self {
            bind,
            session,
            static_dir: args.static_dir,
            log_level: args.log_level,
            tasks: args.tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config, ConfigError> {
        let mut full = vec!["focus_companion"];
        full.extend_from_slice(argv);
        Config::from_args(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.bind.port(), 3000);
        assert_eq!(cfg.session, SessionConfig::default());
        assert!(cfg.tasks.is_empty());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--focus-minutes",
            "45",
            "--break-minutes",
            "10",
            "--sessions",
            "2",
            "--task",
            "Read",
            "--task",
            "Write",
        ])
        .unwrap();
        assert_eq!(cfg.session.focus_minutes.get(), 45);
        assert_eq!(cfg.session.break_minutes.get(), 10);
        assert_eq!(cfg.session.total_sessions.get(), 2);
        assert_eq!(cfg.tasks, vec!["Read", "Write"]);
    }

    #[test]
    fn rejects_values_outside_the_choices() {
        assert_eq!(
            parse(&["--focus-minutes", "40"]).unwrap_err(),
            ConfigError::InvalidFocusMinutes(40)
        );
        assert_eq!(
            parse(&["--break-minutes", "3"]).unwrap_err(),
            ConfigError::InvalidBreakMinutes(3)
        );
        assert_eq!(
            parse(&["--sessions", "0"]).unwrap_err(),
            ConfigError::InvalidSessionCount
        );
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert_eq!(
            parse(&["--bind", "localhost"]).unwrap_err(),
            ConfigError::InvalidBindAddr("localhost".to_string())
        );
    }
}
