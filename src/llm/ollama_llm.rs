use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::http_client::BackendHttpClient;
use super::llm_interface::{GenerationBackend, GenerationParams};

/// Ollama backend using `/api/generate` in raw mode
/// Raw mode keeps Ollama from wrapping our ChatML prompt in its own template
pub struct OllamaLLM {
    model: String,
    http: BackendHttpClient,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    raw: bool,
    stream: bool,
    options: GenerateOptions<'a>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions<'a> {
    temperature: f32,
    num_predict: u32,
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaLLM {
    pub fn new(model: String, http: BackendHttpClient) -> Self {
        info!("Initialized OllamaLLM: model={}, base_url={}", model, http.base_url());
        Self { model, http }
    }
}

#[async_trait]
impl GenerationBackend for OllamaLLM {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, anyhow::Error> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            raw: true,
            stream: false,
            options: GenerateOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
                stop: &params.stop,
            },
        };

        let response: GenerateResponse = self.http.post_json("/api/generate", &request).await?;
        debug!("OllamaLLM generated {} chars", response.response.len());
        Ok(response.response.trim().to_string())
    }
}
