//! Completion providers
//!
//! HTTP transports for the supported provider APIs, interpretation of
//! their responses, and the retrying [`CompletionClient`].

pub mod client;
pub mod huggingface;
pub mod openai;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod stub;

pub use client::CompletionClient;
pub use huggingface::HuggingFaceTransport;
pub use openai::OpenAiTransport;
pub use transport::{ProviderTransport, RawResponse, TransportError, build_http_client};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    HuggingFace,
    OpenAi,
}

impl ProviderKind {
    pub const VALID_VALUES: &'static [&'static str] = &["huggingface", "openai"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => "bigscience/bloom",
            ProviderKind::OpenAi => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => huggingface::DEFAULT_BASE_URL,
            ProviderKind::OpenAi => openai::DEFAULT_BASE_URL,
        }
    }

    /// Environment variable holding the API key unless configured otherwise
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Build the transport for this provider.
    pub fn transport(
        &self,
        client: reqwest::Client,
        base_url: Option<String>,
        api_key: Option<String>,
    ) -> Arc<dyn ProviderTransport> {
        match self {
            ProviderKind::HuggingFace => {
                Arc::new(HuggingFaceTransport::new(client, base_url, api_key))
            }
            ProviderKind::OpenAi => Arc::new(OpenAiTransport::new(client, base_url, api_key)),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
