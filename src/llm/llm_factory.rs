use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::http_client::BackendHttpClient;
use super::llama_cpp_llm::LlamaCppLLM;
use super::llm_interface::GenerationBackend;
use super::ollama_llm::OllamaLLM;
use super::openai_compatible_llm::OpenAICompatibleLLM;
use crate::config::LLMConfig;

/// Factory for creating generation backends
pub struct LLMFactory;

impl LLMFactory {
    /// Create a backend based on the configuration.
    ///
    /// # Arguments
    /// * `llm_config` - provider name, endpoint and credentials
    pub fn create_backend(llm_config: &LLMConfig) -> Result<Arc<dyn GenerationBackend>> {
        info!("Initializing LLM: {}", llm_config.llm_provider);

        let http = BackendHttpClient::new(
            llm_config.base_url.clone(),
            llm_config.llm_api_key.clone(),
            llm_config.request_timeout_secs,
        )?;

        match llm_config.llm_provider.as_str() {
            "openai_compatible_llm" | "openai_llm" | "vllm_llm" => Ok(Arc::new(
                OpenAICompatibleLLM::new(llm_config.model.clone(), http),
            )),
            "ollama_llm" => Ok(Arc::new(OllamaLLM::new(llm_config.model.clone(), http))),
            "llama_cpp_llm" => Ok(Arc::new(LlamaCppLLM::new(http))),
            other => Err(anyhow::anyhow!("Unsupported LLM provider: {}", other)),
        }
    }
}
