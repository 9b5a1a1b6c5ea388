//! Retry policy from TOML (`[retry]` section)

use finchat_domain::{ConfigIssue, ConfigIssueCode, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on attempts per request
const MAX_ATTEMPTS: u32 = 10;
/// Upper bound on the backoff and per-attempt timeout, in seconds
const MAX_WAIT_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Total attempts including the first (default: 3)
    pub max_attempts: u32,
    /// Wait between attempts in seconds (default: 20)
    pub backoff_secs: u64,
    /// Per-attempt timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            backoff_secs: policy.backoff.as_secs(),
            timeout_secs: policy.attempt_timeout.as_secs(),
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_secs(self.backoff_secs),
            Duration::from_secs(self.timeout_secs),
        )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(1..=MAX_ATTEMPTS).contains(&self.max_attempts) {
            issues.push(out_of_range(
                "retry.max_attempts",
                &format!("{} is outside [1, {MAX_ATTEMPTS}]", self.max_attempts),
            ));
        }
        if self.backoff_secs > MAX_WAIT_SECS {
            issues.push(out_of_range(
                "retry.backoff_secs",
                &format!("{} is above {MAX_WAIT_SECS}", self.backoff_secs),
            ));
        }
        if !(1..=MAX_WAIT_SECS).contains(&self.timeout_secs) {
            issues.push(out_of_range(
                "retry.timeout_secs",
                &format!("{} is outside [1, {MAX_WAIT_SECS}]", self.timeout_secs),
            ));
        }
        issues
    }
}

fn out_of_range(field: &str, detail: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{field}: {detail}"),
    )
}
