use std::sync::Arc;

use tracing::{debug, warn};

use super::error::TranslateError;
use super::interface::TranslationOutput;
use super::normalize::normalize;
use super::prompt::build_prompt;
use super::recovery::recover_mapping;
use super::validate::{validate, ValidatedOutput};
use crate::llm::{GenerationBackend, GenerationParams};

/// Normalize, recover and validate one raw model answer.
///
/// Pure: the same `raw` always yields the same result.
pub fn recover_output(raw: &str) -> Result<ValidatedOutput, TranslateError> {
    let candidate = normalize(raw);
    let mapping = recover_mapping(candidate)?;
    Ok(validate(&mapping))
}

/// Prompt → generate → recover pipeline over a shared backend
pub struct Translator {
    backend: Arc<dyn GenerationBackend>,
    params: GenerationParams,
    recovery_retries: u32,
}

impl Translator {
    pub fn new(backend: Arc<dyn GenerationBackend>, params: GenerationParams) -> Self {
        Self {
            backend,
            params,
            recovery_retries: 0,
        }
    }

    /// Regenerate up to `retries` more times when the answer cannot be recovered
    pub fn with_recovery_retries(mut self, retries: u32) -> Self {
        self.recovery_retries = retries;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub async fn translate(
        &self,
        text: &str,
        src_lang: &str,
        tgt_lang: &str,
    ) -> Result<TranslationOutput, TranslateError> {
        self.translate_validated(text, src_lang, tgt_lang)
            .await
            .map(ValidatedOutput::into_output)
    }

    /// Same as [`Translator::translate`] but keeps the downgrade record
    pub async fn translate_validated(
        &self,
        text: &str,
        src_lang: &str,
        tgt_lang: &str,
    ) -> Result<ValidatedOutput, TranslateError> {
        let prompt = build_prompt(text, src_lang, tgt_lang);
        let mut attempt = 0;

        loop {
            let raw = self
                .backend
                .generate(&prompt, &self.params)
                .await
                .map_err(TranslateError::Generation)?;
            debug!(attempt, raw_len = raw.len(), "received model output");

            match recover_output(&raw) {
                Ok(validated) => return Ok(validated),
                Err(e) if attempt < self.recovery_retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "unrecoverable model output, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
