//! OpenAI-compatible chat completions transport.

use super::transport::{ProviderTransport, RawResponse, TransportError, post_json};
use async_trait::async_trait;
use finchat_domain::CompletionRequest;
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiTransport {
    pub fn new(client: reqwest::Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Chat completion body with the system instruction as its own message.
    ///
    /// `do_sample` has no counterpart here and is not sent.
    pub fn body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user", "content": request.user_prompt },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "top_p": request.sampling.top_p,
            "stop": request.sampling.stop,
        })
    }
}

#[async_trait]
impl ProviderTransport for OpenAiTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<RawResponse, TransportError> {
        post_json(
            &self.client,
            &self.endpoint(),
            self.api_key.as_deref(),
            &Self::body(request),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
