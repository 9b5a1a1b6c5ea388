//! Prompt templates for financial advice requests

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Marker that ends the user prompt; providers that echo the prompt put
/// their generated answer after it.
pub const ANSWER_MARKER: &str = "Answer:";

/// System/user prompt pair sent to a completion provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system_instruction: String,
    pub user_prompt: String,
}

impl PromptPair {
    /// Single-text form for providers without a system role.
    pub fn combined(&self) -> String {
        format!("{} {}", self.system_instruction, self.user_prompt)
    }
}

/// Builds the prompts for in-domain questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instruction used for every advice request
    pub fn system_instruction() -> &'static str {
        "You are a knowledgeable financial advisor providing clear, practical, and ethical financial advice."
    }

    /// User prompt wrapping the question
    pub fn user_prompt(message: &str) -> String {
        format!(
            "Provide clear and practical advice for the following question:\n\nQuestion: {}\n\n{}",
            message, ANSWER_MARKER
        )
    }

    /// Build the prompt pair.
    ///
    /// No topic validation happens here; the caller has already classified
    /// the message. Only an empty message is rejected.
    pub fn build(message: &str) -> Result<PromptPair, DomainError> {
        if message.is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(PromptPair {
            system_instruction: Self::system_instruction().to_string(),
            user_prompt: Self::user_prompt(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_exact_text() {
        let pair = PromptBuilder::build("How much should I save?").unwrap();
        assert_eq!(
            pair.system_instruction,
            "You are a knowledgeable financial advisor providing clear, practical, and ethical financial advice."
        );
        assert_eq!(
            pair.user_prompt,
            "Provide clear and practical advice for the following question:\n\nQuestion: How much should I save?\n\nAnswer:"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = PromptBuilder::build("debt payoff").unwrap();
        let b = PromptBuilder::build("debt payoff").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_empty_fails() {
        assert_eq!(PromptBuilder::build(""), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn test_user_prompt_ends_with_marker() {
        assert!(PromptBuilder::user_prompt("taxes").ends_with(ANSWER_MARKER));
    }

    #[test]
    fn test_combined_joins_with_space() {
        let pair = PromptBuilder::build("taxes").unwrap();
        let combined = pair.combined();
        assert!(combined.starts_with("You are a knowledgeable financial advisor"));
        assert!(combined.contains("advice. Provide clear"));
        assert!(combined.ends_with("Question: taxes\n\nAnswer:"));
    }
}
