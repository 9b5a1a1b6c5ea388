//! HTTP server configuration from TOML (`[server]` section)

use finchat_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Origins allowed by default: the local frontend dev server
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Interface to bind (default: "127.0.0.1")
    pub host: String,
    /// Port to bind (default: 5000)
    pub port: u16,
    /// Browser origins allowed to call the API
    pub cors_origins: Vec<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileServerConfig {
    /// `host:port` as passed to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.host.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "server.host".to_string(),
                },
                "server.host: must not be empty",
            ));
        }
        if self.cors_origins.iter().any(|o| o.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "server.cors_origins".to_string(),
                },
                "server.cors_origins: empty entries are ignored",
            ));
        }
        if self.cors_origins.iter().any(|o| o.trim() == "*") {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnumValue {
                    field: "server.cors_origins".to_string(),
                    value: "*".to_string(),
                    valid_values: vec![
                        "an explicit origin such as http://localhost:5173".to_string(),
                    ],
                },
                "server.cors_origins: \"*\" cannot be combined with credentialed requests; list each origin",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_host_is_error() {
        let config = FileServerConfig {
            host: " ".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_wildcard_origin_is_error() {
        let config = FileServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string(), " * ".to_string()],
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("server.cors_origins"));
    }
}
