//! ChatML prompt for the translation model.
//!
//! The user's text is inserted verbatim, including into the JSON skeleton the
//! model is asked to complete. Nothing is escaped, so text containing
//! `<|im_end|>` or a stray `"` reaches the model as-is.

const SYSTEM_PROMPT: &str = r#"You are a professional translation engine. Follow these rules STRICTLY:

1. Translate EXACTLY what is written - do NOT add words, context, or interpretations
2. Provide LITERAL, word-for-word translation only
3. Do NOT embellish, explain, or add details not in the original
4. If uncertain, translate in humanlike way - never guess or infer meaning
5. Output ONLY valid JSON in a code block
6. Stop immediately after closing ```
7. Do not use any language other than the target language in the translation

Schema:
{
  "original_text": "<original>",
  "translated_text": "<Humanlike translation only - no additions>"
}

CRITICAL: The translated_text must contain ONLY the direct translation. No extra words."#;

const FEW_SHOT_USER: &str = r#"Translate from Bangla to English.

IMPORTANT: Provide a HUMANLIKE, DIRECT translation. Do NOT add any words or context not present in the original text.

TEXT:
আমি ভাত খাই

Output ONLY this JSON:
```json
{
  "original_text": "আমি ভাত খাই",
  "translated_text": "I eat rice"
}
```"#;

const FEW_SHOT_ASSISTANT: &str = r#"```json
{
  "original_text": "আমি ভাত খাই",
  "translated_text": "I eat rice"
}
```"#;

pub const TURN_START: &str = "<|im_start|>";
pub const TURN_END: &str = "<|im_end|>";

fn user_turn(text: &str, src_lang: &str, tgt_lang: &str) -> String {
    format!(
        r#"Translate the following text from {src_lang} to {tgt_lang}.

IMPORTANT: Provide a HUMANLIKE, DIRECT translation. Do NOT add any words or context not present in the original text.

TEXT:
{text}

Output ONLY this JSON:
```json
{{
  "original_text": "{text}",
  "translated_text": "<your humanlike translation here>"
}}
```"#
    )
}

/// Render the full prompt: system rules, one worked example, the live request,
/// and an open assistant turn for the model to complete.
pub fn build_prompt(text: &str, src_lang: &str, tgt_lang: &str) -> String {
    let mut prompt = String::new();
    for (role, content) in [
        ("system", SYSTEM_PROMPT.to_string()),
        ("user", FEW_SHOT_USER.to_string()),
        ("assistant", FEW_SHOT_ASSISTANT.to_string()),
        ("user", user_turn(text, src_lang, tgt_lang)),
    ] {
        prompt.push_str(&format!("{TURN_START}{role}\n{content}{TURN_END}\n"));
    }
    prompt.push_str(&format!("{TURN_START}assistant\n"));
    prompt
}
