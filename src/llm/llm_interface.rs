use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to a generation backend on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// `0.0` selects deterministic (greedy) decoding
    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_stop_sequences")]
    pub stop: Vec<String>,
}

fn default_max_tokens() -> u32 {
    2048
}

/// Stop sequences matching the ChatML prompt template.
/// The brace-then-fence sequence cuts the closing `}` off otherwise complete answers.
pub fn default_stop_sequences() -> Vec<String> {
    ["```\n", "```\n\n", "<|im_end|>", "\n\nTranslate", "}\n```"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            stop: default_stop_sequences(),
        }
    }
}

/// Interface for a text-completion backend
/// The backend holds no conversation state; every call is a fresh completion of `prompt`
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Complete `prompt` and return the raw generated text.
    /// Output may be cut short by a stop sequence or the token budget.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, anyhow::Error>;
}
