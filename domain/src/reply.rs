//! Chat replies and the fixed response texts.

use serde::{Deserialize, Serialize};

/// Reply to identity questions
pub const IDENTITY_RESPONSE: &str = "I am your AI Financial Advisor, designed to provide helpful guidance on personal finance topics including savings, investments, budgeting, and more. How can I assist you with your financial questions today?";

/// Reply to off-topic questions
pub const NON_FINANCE_RESPONSE: &str = "I can only provide advice related to personal finance. Please ask about savings, investments, budgeting, or similar topics.";

/// Reply when the provider produced nothing usable
pub const EMPTY_GENERATION_RESPONSE: &str = "I apologize, but I couldn't generate a proper response. Please try asking your question again.";

/// Which path produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Text generated by the completion provider
    Generated,
    /// Fixed identity text
    Identity,
    /// Fixed refusal text
    OffTopic,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Generated => "generated",
            ReplyKind::Identity => "identity",
            ReplyKind::OffTopic => "off_topic",
        }
    }
}

impl std::fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub kind: ReplyKind,
}

impl ChatReply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Generated,
        }
    }

    pub fn identity() -> Self {
        Self {
            text: IDENTITY_RESPONSE.to_string(),
            kind: ReplyKind::Identity,
        }
    }

    pub fn off_topic() -> Self {
        Self {
            text: NON_FINANCE_RESPONSE.to_string(),
            kind: ReplyKind::OffTopic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_replies() {
        assert_eq!(ChatReply::identity().text, IDENTITY_RESPONSE);
        assert_eq!(ChatReply::off_topic().text, NON_FINANCE_RESPONSE);
        assert_eq!(ChatReply::generated("x").kind, ReplyKind::Generated);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ReplyKind::OffTopic).unwrap();
        assert_eq!(json, "\"off_topic\"");
    }
}
