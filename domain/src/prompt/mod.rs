//! Prompt domain
//!
//! Templates for the prompts sent to the completion provider.

mod template;

pub use template::{ANSWER_MARKER, PromptBuilder, PromptPair};
