use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("{what} is too large ({actual} > {limit} limit)")]
    InputTooLarge {
        what: String,
        actual: usize,
        limit: usize,
    },

    #[error("diff computation timed out after {0:?}")]
    Timeout(Duration),

    #[error("diff computation was cancelled")]
    Cancelled,

    #[error("diff worker is not available")]
    WorkerUnavailable,

    #[error("diff computation failed: {0}")]
    Computation(String),

    #[error("malformed diff result: {0}")]
    Malformed(String),
}

impl DiffError {
    /// Failures after which the caller retries with the positional engine.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiffError::Timeout(_)
                | DiffError::Cancelled
                | DiffError::WorkerUnavailable
                | DiffError::Computation(_)
                | DiffError::Malformed(_)
        )
    }
}

/// Why a user supplied strip pattern was dropped.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    Invalid(#[from] regex::Error),

    #[error("pattern took longer than {0:?} on the sample input")]
    TimedOut(Duration),

    #[error("pattern validation aborted: {0}")]
    Aborted(String),
}
