//! Topic vocabulary (Value Object)

use crate::core::error::DomainError;

/// Built-in personal-finance topic phrases
pub const FINANCE_TOPICS: &[&str] = &[
    "savings",
    "saving",
    "budget",
    "budgeting",
    "invest",
    "investing",
    "investments",
    "stocks",
    "mutual funds",
    "retirement",
    "financial planning",
    "credit score",
    "cryptocurrency",
    "insurance",
    "real estate",
    "taxes",
    "income",
    "expenses",
    "debt",
    "interest rates",
    "mortgage",
    "financial goals",
    "401k",
];

/// Phrases that mark a question about the assistant itself
pub const IDENTITY_PHRASES: &[&str] = &[
    "who are you",
    "what are you",
    "your name",
    "who you are",
    "tell me about yourself",
];

/// Ordered, lowercase phrase lists used by the topic classifier.
///
/// Topic and identity phrases are kept disjoint: a phrase that appears in
/// both inputs is kept only as an identity phrase. Identity phrases still
/// count as in-domain, so nothing is lost by the removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    topics: Vec<String>,
    identity: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from arbitrary phrase lists.
    ///
    /// Phrases are trimmed and lowercased, blanks are dropped and duplicates
    /// are collapsed keeping first-seen order.
    pub fn new<T, I>(topics: T, identity: I) -> Result<Self, DomainError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let identity = normalize(identity);
        let topics: Vec<String> = normalize(topics)
            .into_iter()
            .filter(|t| !identity.contains(t))
            .collect();

        if topics.is_empty() && identity.is_empty() {
            return Err(DomainError::InvalidVocabulary(
                "at least one phrase is required".to_string(),
            ));
        }

        Ok(Self { topics, identity })
    }

    /// The built-in personal-finance vocabulary
    pub fn personal_finance() -> Self {
        Self {
            topics: FINANCE_TOPICS.iter().map(|s| s.to_string()).collect(),
            identity: IDENTITY_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Append extra topic phrases (e.g. from configuration).
    pub fn with_extra_topics<T>(self, extra: T) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut topics = self.topics;
        for phrase in normalize(extra) {
            if !topics.contains(&phrase) && !self.identity.contains(&phrase) {
                topics.push(phrase);
            }
        }
        Self {
            topics,
            identity: self.identity,
        }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn identity_phrases(&self) -> &[String] {
        &self.identity
    }

    /// Total number of phrases across both lists
    pub fn len(&self) -> usize {
        self.topics.len() + self.identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::personal_finance()
    }
}

fn normalize<T>(phrases: T) -> Vec<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for phrase in phrases {
        let phrase = phrase.as_ref().trim().to_lowercase();
        if !phrase.is_empty() && !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_finance_lists_are_disjoint() {
        let vocab = Vocabulary::personal_finance();
        for phrase in vocab.identity_phrases() {
            assert!(!vocab.topics().contains(phrase), "{phrase} in both lists");
        }
    }

    #[test]
    fn test_personal_finance_is_lowercase() {
        let vocab = Vocabulary::personal_finance();
        for phrase in vocab.topics().iter().chain(vocab.identity_phrases()) {
            assert_eq!(phrase, &phrase.to_lowercase());
        }
    }

    #[test]
    fn test_new_normalizes_and_dedups() {
        let vocab = Vocabulary::new(["  Stocks ", "stocks", "BONDS", ""], ["Who Are You"]).unwrap();
        assert_eq!(vocab.topics(), &["stocks".to_string(), "bonds".to_string()]);
        assert_eq!(vocab.identity_phrases(), &["who are you".to_string()]);
    }

    #[test]
    fn test_new_moves_overlap_to_identity() {
        let vocab = Vocabulary::new(["your name", "debt"], ["your name"]).unwrap();
        assert_eq!(vocab.topics(), &["debt".to_string()]);
        assert_eq!(vocab.identity_phrases(), &["your name".to_string()]);
    }

    #[test]
    fn test_new_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(Vocabulary::new(empty, ["  "]).is_err());
    }

    #[test]
    fn test_with_extra_topics_appends_in_order() {
        let base = Vocabulary::personal_finance();
        let base_len = base.topics().len();
        let vocab = base.with_extra_topics(["Pension", "savings", "who are you", "annuity"]);
        assert_eq!(vocab.topics().len(), base_len + 2);
        assert_eq!(vocab.topics()[base_len], "pension");
        assert_eq!(vocab.topics()[base_len + 1], "annuity");
    }
}
