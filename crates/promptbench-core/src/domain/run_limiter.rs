//! Single-run limiter for preview contexts.
//!
//! ```text
//!   Ready ──begin()──► Running ──finish()──► Consumed
//!                         │                     │
//!                   begin(): RunInProgress   begin(): RunAlreadyConsumed
//! ```
//!
//! A failed run consumes the allowance exactly like a successful one. There
//! is no way back to `Ready`; a new preview context needs a new limiter.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Ready,
    Running,
    Consumed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Running => write!(f, "running"),
            Self::Consumed => write!(f, "consumed"),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCompletion {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct RunLimiter {
    state: RunState,
}

impl RunLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// `true` while the single run is still available.
    pub fn can_run(&self) -> bool {
        self.state == RunState::Ready
    }

    pub fn is_consumed(&self) -> bool {
        self.state == RunState::Consumed
    }

    /// The rejection `begin()` would return, without changing state.
    pub fn check(&self) -> Result<(), DomainError> {
        match self.state {
            RunState::Ready => Ok(()),
            RunState::Running => Err(DomainError::RunInProgress),
            RunState::Consumed => Err(DomainError::RunAlreadyConsumed),
        }
    }

    /// Claim the run. Only succeeds from `Ready`.
    pub fn begin(&mut self) -> Result<(), DomainError> {
        self.check()?;
        self.state = RunState::Running;
        debug!("Preview run started");
        Ok(())
    }

    /// End the claimed run; success and failure both consume it.
    pub fn finish(&mut self, completion: RunCompletion) {
        if self.state != RunState::Running {
            warn!(state = %self.state, "finish() called without a run in progress");
            return;
        }
        self.state = RunState::Consumed;
        debug!(?completion, "Preview run consumed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_ready() {
        let limiter = RunLimiter::new();
        assert_eq!(limiter.state(), RunState::Ready);
        assert!(limiter.can_run());
    }

    #[test]
    fn success_consumes() {
        let mut limiter = RunLimiter::new();
        limiter.begin().unwrap();
        assert_eq!(limiter.state(), RunState::Running);
        limiter.finish(RunCompletion::Succeeded);
        assert!(limiter.is_consumed());
    }

    #[test]
    fn failure_consumes() {
        let mut limiter = RunLimiter::new();
        limiter.begin().unwrap();
        limiter.finish(RunCompletion::Failed);
        assert_eq!(limiter.state(), RunState::Consumed);
    }

    #[test]
    fn begin_after_consumed_is_rejected() {
        let mut limiter = RunLimiter::new();
        limiter.begin().unwrap();
        limiter.finish(RunCompletion::Succeeded);
        assert_eq!(limiter.begin(), Err(DomainError::RunAlreadyConsumed));
        assert_eq!(limiter.state(), RunState::Consumed);
    }

    #[test]
    fn begin_while_running_is_rejected() {
        let mut limiter = RunLimiter::new();
        limiter.begin().unwrap();
        assert_eq!(limiter.begin(), Err(DomainError::RunInProgress));
    }

    #[test]
    fn check_does_not_change_state() {
        let mut limiter = RunLimiter::new();
        assert!(limiter.check().is_ok());
        assert_eq!(limiter.state(), RunState::Ready);
        limiter.begin().unwrap();
        limiter.finish(RunCompletion::Failed);
        assert_eq!(limiter.check(), Err(DomainError::RunAlreadyConsumed));
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut limiter = RunLimiter::new();
        limiter.finish(RunCompletion::Succeeded);
        assert_eq!(limiter.state(), RunState::Ready);
    }
}
