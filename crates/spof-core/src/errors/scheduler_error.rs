//! Scheduler errors.

use super::error_code::{self, SpofErrorCode};

/// Errors raised while starting the background scheduler.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("failed to spawn scheduler thread: {message}")]
    Spawn { message: String },

    #[error("scheduler state lock poisoned")]
    LockPoisoned,
}

impl SpofErrorCode for SchedulerError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEDULER_ERROR
    }
}
