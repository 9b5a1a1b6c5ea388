//! Substring-based topic and identity classification.
//!
//! Matching is plain case-insensitive containment: "invest" matches inside
//! "reinvestment" and "debt" inside "indebted". Word-boundary matching
//! would change which messages get refused, so containment is kept.

use super::vocabulary::Vocabulary;
use std::sync::Arc;

/// Result of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'v> {
    /// Message is within the allowed topic domain
    pub in_domain: bool,
    /// Message asks about the assistant itself
    pub is_identity: bool,
    /// First phrase that matched (identity phrases are checked first)
    pub matched: Option<&'v str>,
}

impl Classification<'_> {
    /// Off-topic messages get the fixed refusal
    pub fn is_off_topic(&self) -> bool {
        !self.in_domain
    }
}

/// Decides whether a message is on-topic and whether it is an identity question.
///
/// Cheap to clone; the vocabulary is shared.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    vocabulary: Arc<Vocabulary>,
}

impl TopicClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
        }
    }

    pub fn classify(&self, message: &str) -> Classification<'_> {
        let lowered = message.to_lowercase();

        let identity_match = first_match(&lowered, self.vocabulary.identity_phrases());
        if identity_match.is_some() {
            return Classification {
                in_domain: true,
                is_identity: true,
                matched: identity_match,
            };
        }

        let topic_match = first_match(&lowered, self.vocabulary.topics());
        Classification {
            in_domain: topic_match.is_some(),
            is_identity: false,
            matched: topic_match,
        }
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new(Vocabulary::personal_finance())
    }
}

fn first_match<'v>(haystack: &str, phrases: &'v [String]) -> Option<&'v str> {
    phrases
        .iter()
        .find(|phrase| haystack.contains(phrase.as_str()))
        .map(String::as_str)
}
