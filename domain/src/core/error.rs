//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Cannot build a prompt from an empty message")]
    EmptyPrompt,

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Message cannot be empty");
    }
}
