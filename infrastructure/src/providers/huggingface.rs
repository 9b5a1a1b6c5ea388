//! Hugging Face text-generation inference transport.

use super::transport::{ProviderTransport, RawResponse, TransportError, post_json};
use async_trait::async_trait;
use finchat_domain::CompletionRequest;
use serde_json::{Value, json};

/// Hosted inference API root; the model id is appended as a path
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

pub struct HuggingFaceTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HuggingFaceTransport {
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

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// Request body for the text-generation task.
    ///
    /// The full text is requested back; the answer is cut out of it after
    /// the `Answer:` marker.
    pub fn body(request: &CompletionRequest) -> Value {
        json!({
            "inputs": request.combined_prompt(),
            "parameters": {
                "max_new_tokens": request.max_tokens,
                "temperature": request.temperature,
                "top_p": request.sampling.top_p,
                "do_sample": request.sampling.do_sample,
                "return_full_text": true,
                "stop": request.sampling.stop,
                "num_return_sequences": 1,
            }
        })
    }
}

#[async_trait]
impl ProviderTransport for HuggingFaceTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(&request.model);
        post_json(
            &self.client,
            &url,
            self.api_key.as_deref(),
            &Self::body(request),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
