//! Configuration file loading for finchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FINCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./finchat.toml` or `./.finchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/finchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_CORS_ORIGINS, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileProviderConfig, FileRetryConfig, FileServerConfig, FileVocabularyConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX};
