//! End-to-end pipeline tests against a scripted generation backend.

mod common;

use std::sync::Arc;

use common::ScriptedBackend;
use translate_backend::llm::GenerationParams;
use translate_backend::translate::{
    recover_output, RecoveryError, TranslateError, TranslationOutput, Translator,
};

fn translator(backend: Arc<ScriptedBackend>) -> Translator {
    Translator::new(backend, GenerationParams::default())
}

#[tokio::test]
async fn translates_fenced_model_answer() {
    let backend = ScriptedBackend::new([
        "```json\n{\"original_text\": \"I eat rice\", \"translated_text\": \"আমি ভাত খাই\"}\n```",
    ]);

    let output = translator(backend.clone())
        .translate("I eat rice", "English", "Bangla")
        .await
        .unwrap();

    assert_eq!(
        output,
        TranslationOutput {
            original_text: "I eat rice".to_string(),
            translated_text: "আমি ভাত খাই".to_string(),
        }
    );
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn backend_receives_prompt_and_deterministic_params() {
    let backend = ScriptedBackend::new([r#"{"original_text": "x", "translated_text": "y"}"#]);
    translator(backend.clone())
        .translate("Good morning", "English", "Bangla")
        .await
        .unwrap();

    let calls = backend.calls.lock().unwrap();
    let (prompt, params) = &calls[0];
    assert!(prompt.contains("Translate the following text from English to Bangla."));
    assert!(prompt.ends_with("<|im_start|>assistant\n"));
    assert_eq!(params.temperature, 0.0);
    assert_eq!(params.max_tokens, 2048);
    assert!(params.stop.iter().any(|s| s == "<|im_end|>"));
}

#[tokio::test]
async fn truncated_answer_is_repaired() {
    let backend = ScriptedBackend::new([
        "Assistant: {\"original_text\": \"hi\", \"translated_text\": \"bonj",
    ]);
    let output = translator(backend).translate("hi", "English", "French").await.unwrap();
    assert_eq!(output.translated_text, "bonj");
}

#[tokio::test]
async fn missing_field_is_downgraded_not_failed() {
    let backend = ScriptedBackend::new([r#"{"original_text": "hi"}"#]);
    let validated = translator(backend)
        .translate_validated("hi", "English", "French")
        .await
        .unwrap();

    assert!(validated.is_downgraded());
    assert_eq!(validated.output.original_text, "hi");
    assert_eq!(validated.output.translated_text, "");
}

#[tokio::test]
async fn answer_without_json_fails_without_retry() {
    let backend = ScriptedBackend::new(["I cannot translate that.", "unused"]);
    let err = translator(backend.clone())
        .translate("hi", "English", "French")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::Recovery(RecoveryError::NoJsonFound)));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn recovery_retry_regenerates_once() {
    let backend = ScriptedBackend::new([
        "I cannot translate that.",
        r#"{"original_text": "hi", "translated_text": "salut"}"#,
    ]);
    let output = translator(backend.clone())
        .with_recovery_retries(1)
        .translate("hi", "English", "French")
        .await
        .unwrap();

    assert_eq!(output.translated_text, "salut");
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn retries_are_bounded() {
    let backend = ScriptedBackend::new(["nope", "{\"original_text\": ", "never reached"]);
    let err = translator(backend.clone())
        .with_recovery_retries(1)
        .translate("hi", "English", "French")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::Recovery(RecoveryError::JsonRepairFailed(_))));
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn backend_failure_is_a_generation_error() {
    let backend = ScriptedBackend::failing("connection refused");
    let err = translator(backend).translate("hi", "English", "French").await.unwrap_err();

    assert!(matches!(err, TranslateError::Generation(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn same_raw_output_yields_same_result() {
    let raw = "Note: informal register\nSure!\n{original_text: 'a', 'translated_text': 'b',}\nHope it helps";
    assert_eq!(recover_output(raw).unwrap(), recover_output(raw).unwrap());
}
