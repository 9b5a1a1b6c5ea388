//! Generation parameters from TOML (`[generation]` section)

use finchat_application::GenerationSettings;
use finchat_domain::{ConfigIssue, ConfigIssueCode, SamplingParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Maximum tokens to generate (default: 150)
    pub max_tokens: u32,
    /// Sampling temperature in [0, 2] (default: 0.7)
    pub temperature: f32,
    /// Nucleus sampling in (0, 1] (default: 0.95)
    pub top_p: f32,
    /// Sample instead of greedy decoding (default: true)
    pub do_sample: bool,
    /// Stop sequences (default: blank line and "Question:")
    pub stop: Vec<String>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let sampling = SamplingParams::default();
        Self {
            max_tokens: 150,
            temperature: 0.7,
            top_p: sampling.top_p,
            do_sample: sampling.do_sample,
            stop: sampling.stop,
        }
    }
}

impl FileGenerationConfig {
    pub fn to_settings(&self, model: impl Into<String>) -> GenerationSettings {
        GenerationSettings::default()
            .with_model(model)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_sampling(SamplingParams {
                top_p: self.top_p,
                do_sample: self.do_sample,
                stop: self.stop.clone(),
            })
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_tokens == 0 {
            issues.push(out_of_range("generation.max_tokens", "must be at least 1"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(out_of_range(
                "generation.temperature",
                &format!("{} is outside [0, 2]", self.temperature),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            issues.push(out_of_range(
                "generation.top_p",
                &format!("{} is outside (0, 1]", self.top_p),
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
