//! Completion request value objects

use crate::prompt::PromptPair;
use serde::{Deserialize, Serialize};

/// Sampling options forwarded to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub top_p: f32,
    pub do_sample: bool,
    /// Sequences at which generation stops
    pub stop: Vec<String>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            top_p: 0.95,
            do_sample: true,
            stop: vec!["\n\n".to_string(), "Question:".to_string()],
        }
    }
}

/// Everything a provider needs for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub sampling: SamplingParams,
}

impl CompletionRequest {
    pub fn new(prompt: PromptPair, model: impl Into<String>) -> Self {
        Self {
            system_instruction: prompt.system_instruction,
            user_prompt: prompt.user_prompt,
            model: model.into(),
            max_tokens: 150,
            temperature: 0.7,
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
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

    /// System instruction and user prompt as one text input
    pub fn combined_prompt(&self) -> String {
        format!("{} {}", self.system_instruction, self.user_prompt)
    }
}
