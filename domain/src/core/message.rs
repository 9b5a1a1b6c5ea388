//! Incoming message value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user message that passed input validation (Value Object)
///
/// The content is stored trimmed and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    content: String,
}

impl IncomingMessage {
    /// Validate raw caller input.
    ///
    /// Leading and trailing whitespace is removed; a message that is empty
    /// afterwards is rejected with [`DomainError::EmptyMessage`].
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the message content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of characters (not bytes) in the message
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

impl std::fmt::Display for IncomingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
