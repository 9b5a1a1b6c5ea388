//! Raw TOML configuration data types
//!
//! These structs mirror the structure of the TOML config file. Each section
//! validates itself and converts into the domain/application type it
//! configures.

mod generation;
mod logging;
mod provider;
mod retry;
mod server;
mod vocabulary;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use provider::FileProviderConfig;
pub use retry::FileRetryConfig;
pub use server::{DEFAULT_CORS_ORIGINS, FileServerConfig};
pub use vocabulary::FileVocabularyConfig;

use finchat_application::GenerationSettings;
use finchat_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener and CORS
    pub server: FileServerConfig,
    /// Completion provider selection and credentials
    pub provider: FileProviderConfig,
    /// Generation parameters
    pub generation: FileGenerationConfig,
    /// Retry policy for provider calls
    pub retry: FileRetryConfig,
    /// Log level and log files
    pub logging: FileLoggingConfig,
    /// Topic vocabulary extensions
    pub vocabulary: FileVocabularyConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues with [`Severity::Error`](finchat_domain::Severity::Error)
    /// should stop startup; warnings are reported and ignored.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.server.validate());
        issues.extend(self.provider.validate());
        issues.extend(self.generation.validate());
        issues.extend(self.retry.validate());
        issues.extend(self.logging.validate());
        issues.extend(self.vocabulary.validate());
        issues
    }

    /// Effective configuration as TOML, with any direct API key masked
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut redacted = self.clone();
        if redacted.provider.api_key.is_some() {
            redacted.provider.api_key = Some("********".to_string());
        }
        toml::to_string_pretty(&redacted)
    }

    /// Generation settings for the configured provider's model
    pub fn generation_settings(&self) -> GenerationSettings {
        self.generation.to_settings(self.provider.model())
    }
}
