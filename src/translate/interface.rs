use serde::{Deserialize, Serialize};

/// Inbound translation request as accepted by `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Response body of `POST /translate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Structured model answer; both fields are always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutput {
    pub original_text: String,
    pub translated_text: String,
}

impl TranslationResponse {
    pub fn new(output: TranslationOutput, request: TranslationRequest) -> Self {
        Self {
            original_text: output.original_text,
            translated_text: output.translated_text,
            source_language: request.source_language,
            target_language: request.target_language,
        }
    }
}
