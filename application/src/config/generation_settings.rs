//! Generation settings: per-process completion parameters.
//!
//! [`GenerationSettings`] holds the values every [`CompletionRequest`] is
//! built from. They are loaded once at startup and never change while the
//! process runs.

use finchat_domain::{CompletionRequest, PromptPair, SamplingParams};
use serde::{Deserialize, Serialize};

/// Model and sampling parameters for completion requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Provider-specific model identifier.
    pub model: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling, sampling switch and stop sequences.
    pub sampling: SamplingParams,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "bigscience/bloom".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            sampling: SamplingParams::default(),
        }
    }
}

impl GenerationSettings {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Snapshot these settings into a request for `prompt`.
    pub fn request_for(&self, prompt: PromptPair) -> CompletionRequest {
        CompletionRequest::new(prompt, self.model.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_sampling(self.sampling.clone())
    }
}
