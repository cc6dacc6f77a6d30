// Talks to a running llama.cpp server; model weights stay in that process

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::http_client::BackendHttpClient;
use super::llm_interface::{GenerationBackend, GenerationParams};

pub struct LlamaCppLLM {
    http: BackendHttpClient,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

impl LlamaCppLLM {
    pub fn new(http: BackendHttpClient) -> Self {
        info!("Initialized LlamaCppLLM: base_url={}", http.base_url());
        Self { http }
    }
}

#[async_trait]
impl GenerationBackend for LlamaCppLLM {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, anyhow::Error> {
        let request = CompletionRequest {
            prompt,
            n_predict: params.max_tokens,
            temperature: params.temperature,
            stop: &params.stop,
        };

        let response: CompletionResponse = self.http.post_json("/completion", &request).await?;
        debug!("LlamaCppLLM generated {} chars", response.content.len());
        Ok(response.content.trim().to_string())
    }
}
