//! Completion domain
//!
//! Request/result types for the external completion provider, the retry
//! state machine, and answer extraction from generated text.

pub mod answer;
pub mod request;
pub mod result;
pub mod retry;

pub use answer::extract_answer;
pub use request::{CompletionRequest, SamplingParams};
pub use result::{CompletionFailure, CompletionResult, FailureKind};
pub use retry::{AttemptOutcome, RetryPolicy, TransientCause, Transition};
