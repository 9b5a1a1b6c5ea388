//! Completion outcome types

use std::fmt;
use thiserror::Error;

/// Why a completion did not produce usable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Provider kept reporting that the model is loading
    ModelUnavailable,
    /// Transport failure (timeout, connect, read) on every attempt
    NetworkError,
    /// Non-transient provider error status or unreadable body
    ProviderError,
    /// Provider rejected the credentials (401/403)
    Unauthorized,
    /// Provider throttled the request (429)
    RateLimited,
    /// Provider succeeded but returned no usable text
    EmptyGeneration,
    /// Caller cancelled the request
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ModelUnavailable => "model_unavailable",
            FailureKind::NetworkError => "network_error",
            FailureKind::ProviderError => "provider_error",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::EmptyGeneration => "empty_generation",
            FailureKind::Cancelled => "cancelled",
        }
    }

    /// Provider-side errors that retrying will not fix
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            FailureKind::ProviderError | FailureKind::Unauthorized | FailureKind::RateLimited
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed completion: kind plus a diagnostic message for logs.
///
/// The message may contain provider status and body text; it is never
/// shown to end users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct CompletionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CompletionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ModelUnavailable, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NetworkError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ProviderError, message)
    }

    pub fn empty_generation() -> Self {
        Self::new(
            FailureKind::EmptyGeneration,
            "provider returned no text after prompt stripping",
        )
    }

    pub fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "request cancelled")
    }
}

/// Generated text, or why there is none
pub type CompletionResult = Result<String, CompletionFailure>;
