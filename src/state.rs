use std::sync::Arc;

use crate::config::Config;
use crate::llm::{GenerationBackend, LLMFactory};
use crate::translate::Translator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<Translator>,
}

impl AppState {
    /// Build state with the backend named in `config.llm_config`
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = LLMFactory::create_backend(&config.llm_config)?;
        Ok(Self::with_backend(config, backend))
    }

    /// Build state around an already constructed backend
    pub fn with_backend(config: Config, backend: Arc<dyn GenerationBackend>) -> Self {
        let translator = Translator::new(backend, config.llm_config.generation.clone())
            .with_recovery_retries(config.translation_config.recovery_retries);

        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
        }
    }
}
