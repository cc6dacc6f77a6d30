use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::http_client::BackendHttpClient;
use super::llm_interface::{GenerationBackend, GenerationParams};

/// OpenAI-compatible text completion backend (`/v1/completions`)
/// Works against vLLM, TGI and llama.cpp's OpenAI server mode
pub struct OpenAICompatibleLLM {
    model: String,
    http: BackendHttpClient,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAICompatibleLLM {
    pub fn new(model: String, http: BackendHttpClient) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model,
            http.base_url()
        );
        Self { model, http }
    }
}

#[async_trait]
impl GenerationBackend for OpenAICompatibleLLM {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, anyhow::Error> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop: &params.stop,
        };

        let response: CompletionResponse = self.http.post_json("/v1/completions", &request).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| anyhow::anyhow!("completion response contained no choices"))?;

        debug!("OpenAICompatibleLLM generated {} chars", text.len());
        Ok(text.trim().to_string())
    }
}
