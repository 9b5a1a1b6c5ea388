//! Domain layer for finchat
//!
//! This crate contains the decision-making core: which messages are
//! answered, what gets sent to the completion provider, and when a failed
//! provider call is retried. It has no I/O and no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Topic classification
//!
//! A message is *in-domain* when it contains one of the personal-finance
//! phrases of the [`Vocabulary`], and an *identity question* when it contains
//! one of the identity phrases. Identity questions are always in-domain.
//!
//! ## Completion policy
//!
//! - [`PromptBuilder`]: the fixed advisor prompt around the question
//! - [`RetryPolicy`]: bounded retry on transient provider conditions
//! - [`extract_answer`]: removes the echoed prompt from generated text

pub mod completion;
pub mod config;
pub mod core;
pub mod prompt;
pub mod reply;
pub mod topic;

// Re-export commonly used types
pub use completion::{
    AttemptOutcome, CompletionFailure, CompletionRequest, CompletionResult, FailureKind,
    RetryPolicy, SamplingParams, TransientCause, Transition, extract_answer,
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, message::IncomingMessage, string::preview};
pub use prompt::{ANSWER_MARKER, PromptBuilder, PromptPair};
pub use reply::{
    ChatReply, EMPTY_GENERATION_RESPONSE, IDENTITY_RESPONSE, NON_FINANCE_RESPONSE, ReplyKind,
};
pub use topic::{Classification, TopicClassifier, Vocabulary};
