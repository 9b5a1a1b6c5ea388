//! Port for structured exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording one event per handled
//! chat message (which path answered it, how long it took, how it ended).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port produces a machine-readable
//! record (JSONL) of every exchange.

use finchat_domain::ReplyKind;
use std::time::Duration;

/// Outcome recorded for an exchange that produced a reply
pub const SUCCESS_OUTCOME: &str = "success";

/// One handled chat message.
///
/// Carries no message text, only its length, so the log never holds user
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEvent {
    /// Path that produced the reply; `None` when the exchange failed
    pub reply_kind: Option<ReplyKind>,
    /// [`SUCCESS_OUTCOME`] or the failing `ChatError::kind()`
    pub outcome: &'static str,
    /// Time from receiving the message to having a result
    pub latency: Duration,
    /// Characters in the trimmed message
    pub message_chars: usize,
}

impl ExchangeEvent {
    pub fn answered(reply_kind: ReplyKind, latency: Duration, message_chars: usize) -> Self {
        Self {
            reply_kind: Some(reply_kind),
            outcome: SUCCESS_OUTCOME,
            latency,
            message_chars,
        }
    }

    pub fn failed(outcome: &'static str, latency: Duration, message_chars: usize) -> Self {
        Self {
            reply_kind: None,
            outcome,
            latency,
            message_chars,
        }
    }
}

/// Port for logging exchange events.
///
/// `log` is synchronous and infallible; a logging failure must never fail
/// the request being logged.
pub trait ExchangeLogger: Send + Sync {
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
