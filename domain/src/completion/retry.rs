//! Retry policy for completion calls.
//!
//! The retry loop is an explicit state machine. The caller is in state
//! `Attempting(n)` while attempt `n` runs, feeds the [`AttemptOutcome`] into
//! [`RetryPolicy::transition`], and either sleeps and moves to `n + 1` or
//! stops with a final [`CompletionResult`]. No I/O happens here.

use super::result::{CompletionFailure, CompletionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A condition expected to clear up if the call is repeated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientCause {
    /// Provider reported the model is still loading
    ModelLoading(String),
    /// Timeout, connection failure or truncated body
    Network(String),
}

impl TransientCause {
    /// Failure reported when this is the last attempt
    fn into_failure(self, attempts: u32) -> CompletionFailure {
        match self {
            TransientCause::ModelLoading(detail) => CompletionFailure::model_unavailable(format!(
                "model still loading after {attempts} attempts: {detail}"
            )),
            TransientCause::Network(detail) => CompletionFailure::network(format!(
                "no response after {attempts} attempts: {detail}"
            )),
        }
    }
}

/// What one provider attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Usable generated text
    Generated(String),
    /// Worth retrying
    Transient(TransientCause),
    /// Retrying will not help
    Permanent(CompletionFailure),
}

/// Next step after an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Wait `backoff`, then run attempt `next`
    Retry { next: u32, backoff: Duration },
    /// Stop with this result
    Finish(CompletionResult),
}

/// Bounded retry with a fixed backoff and a per-attempt timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Wait before each retry
    pub backoff: Duration,
    /// Upper bound for a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(20),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            attempt_timeout,
        }
    }

    /// Number of the first attempt
    pub const fn first_attempt(&self) -> u32 {
        1
    }

    /// Decide what follows attempt `attempt` given its outcome.
    pub fn transition(&self, attempt: u32, outcome: AttemptOutcome) -> Transition {
        match outcome {
            AttemptOutcome::Generated(text) => Transition::Finish(Ok(text)),
            AttemptOutcome::Permanent(failure) => Transition::Finish(Err(failure)),
            AttemptOutcome::Transient(_) if attempt < self.max_attempts => Transition::Retry {
                next: attempt + 1,
                backoff: self.backoff,
            },
            AttemptOutcome::Transient(cause) => {
                Transition::Finish(Err(cause.into_failure(attempt)))
            }
        }
    }

    /// Upper bound on total time spent, ignoring scheduling delays.
    ///
    /// `None` when the bound does not fit in a `Duration`.
    pub fn worst_case_latency(&self) -> Option<Duration> {
        let retries = self.max_attempts.saturating_sub(1);
        self.attempt_timeout
            .checked_mul(self.max_attempts)?
            .checked_add(self.backoff.checked_mul(retries)?)
    }
}
