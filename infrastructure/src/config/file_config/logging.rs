//! Logging configuration from TOML (`[logging]` section)

use finchat_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Default log level when neither RUST_LOG nor -v is given (default: "info")
    pub level: String,
    /// Directory for daily-rolling log files; console only when unset
    pub directory: Option<PathBuf>,
    /// JSONL file recording one line per chat exchange
    pub exchange_log: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            exchange_log: None,
        }
    }
}

impl FileLoggingConfig {
    /// Parse `level`, falling back to "info"
    pub fn parse_level(&self) -> (&str, Vec<ConfigIssue>) {
        let level = self.level.trim();
        if let Some(valid) = VALID_LEVELS.iter().find(|l| l.eq_ignore_ascii_case(level)) {
            return (*valid, vec![]);
        }
        let issue = ConfigIssue::warning(
            ConfigIssueCode::InvalidEnumValue {
                field: "logging.level".to_string(),
                value: self.level.clone(),
                valid_values: VALID_LEVELS.iter().map(|s| s.to_string()).collect(),
            },
            format!(
                "logging.level: unknown value '{}', falling back to 'info'",
                self.level
            ),
        );
        ("info", vec![issue])
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.parse_level().1
    }
}
