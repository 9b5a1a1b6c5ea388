//! Topic vocabulary extensions from TOML (`[vocabulary]` section)

use finchat_domain::{ConfigIssue, ConfigIssueCode, Vocabulary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVocabularyConfig {
    /// Phrases added to the built-in personal-finance topics
    pub extra_topics: Vec<String>,
}

impl FileVocabularyConfig {
    pub fn to_vocabulary(&self) -> Vocabulary {
        Vocabulary::personal_finance().with_extra_topics(&self.extra_topics)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.extra_topics.iter().any(|t| t.trim().is_empty()) {
            vec![ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "vocabulary.extra_topics".to_string(),
                },
                "vocabulary.extra_topics: empty entries are ignored",
            )]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finchat_domain::TopicClassifier;

    #[test]
    fn test_extra_topics_extend_classifier() {
        let config = FileVocabularyConfig {
            extra_topics: vec!["Crypto".to_string()],
        };
        let classifier = TopicClassifier::new(config.to_vocabulary());
        assert!(classifier.classify("is crypto a good bet?").in_domain);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_blank_entry_warns() {
        let config = FileVocabularyConfig {
            extra_topics: vec!["  ".to_string()],
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(
            config.to_vocabulary().len(),
            Vocabulary::personal_finance().len()
        );
    }
}
