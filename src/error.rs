use thiserror::Error;

/// Rejections raised at the configuration boundary (CLI flags, env vars,
/// request bodies). The scheduler itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("focus minutes must be one of [15, 20, 25, 30, 45, 60], got {0}")]
    InvalidFocusMinutes(u32),

    #[error("break minutes must be one of [5, 10, 15, 20], got {0}")]
    InvalidBreakMinutes(u32),

    #[error("total sessions must be at least 1")]
    InvalidSessionCount,

    #[error("invalid bind address {0:?}")]
    InvalidBindAddr(String),
}
