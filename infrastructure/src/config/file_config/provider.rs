//! Completion provider configuration from TOML (`[provider]` section)

use crate::providers::ProviderKind;
use finchat_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider API: "huggingface" or "openai" (default: "huggingface")
    pub kind: String,
    /// Override of the provider's API root
    pub base_url: Option<String>,
    /// Model identifier (default depends on kind)
    pub model: Option<String>,
    /// Environment variable for the API key (default depends on kind)
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the environment variable instead)
    pub api_key: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default().as_str().to_string(),
            base_url: None,
            model: None,
            api_key_env: None,
            api_key: None,
        }
    }
}

impl FileProviderConfig {
    /// Parse `kind` into a [`ProviderKind`]
    pub fn parse_kind(&self) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.kind.parse::<ProviderKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "provider.kind".to_string(),
                        value: self.kind.clone(),
                        valid_values: ProviderKind::VALID_VALUES
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    },
                    format!(
                        "provider.kind: unknown value '{}', expected one of: {}",
                        self.kind,
                        ProviderKind::VALID_VALUES.join(", ")
                    ),
                );
                (ProviderKind::default(), vec![issue])
            }
        }
    }

    /// Configured model, or the provider's default
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.parse_kind().0.default_model().to_string())
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| self.parse_kind().0.default_api_key_env().to_string())
    }

    /// Resolve the API key: direct value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(self.api_key_env()).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_kind().1;

        if let Some(model) = &self.model
            && model.trim().is_empty()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "provider.model".to_string(),
                },
                "provider.model: must not be empty",
            ));
        }

        if self.resolve_api_key().is_none() {
            let env_var = self.api_key_env();
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingApiKey {
                    env_var: env_var.clone(),
                },
                format!(
                    "provider: no API key found (set {env_var}), requests will be sent without authentication"
                ),
            ));
        }

        issues
    }
}
