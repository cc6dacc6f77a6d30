//! Isolates the JSON-object-shaped region of a raw model answer.

use std::sync::LazyLock;

use regex::Regex;

static ROLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:assistant|model)\s*:\s*").expect("valid regex"));

static COMMENTARY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:note|disclaimer)\s*:[^\n{]*\n?").expect("valid regex"));

fn strip_role_label(text: &str) -> &str {
    match ROLE_LABEL.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn strip_commentary_lines(mut text: &str) -> &str {
    while let Some(m) = COMMENTARY_LINE.find(text) {
        text = &text[m.end()..];
    }
    text
}

/// Strip role echo, leading commentary and surrounding prose from `raw`.
///
/// Commentary stripping stops at a `{`, so when `raw` contains one the result
/// is non-empty, starts at the first `{` and ends at the last `}`, if any.
/// Without a `{` the text is only trimmed; recovery reports the failure.
pub fn normalize(raw: &str) -> &str {
    let text = strip_commentary_lines(strip_role_label(raw));

    let Some(start) = text.find('{') else {
        return text.trim();
    };
    let text = &text[start..];

    let text = match text.rfind('}') {
        Some(end) => &text[..=end],
        None => text,
    };
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_role_label_and_leading_prose() {
        let raw = "Assistant: Sure, here is the translation:\n{\"original_text\":\"a\",\"translated_text\":\"b\"}";
        assert_eq!(normalize(raw), r#"{"original_text":"a","translated_text":"b"}"#);
    }

    #[test]
    fn role_label_is_case_insensitive() {
        assert_eq!(normalize("  ASSISTANT :{\"a\":1}"), r#"{"a":1}"#);
        assert_eq!(normalize("model: no json here"), "no json here");
    }

    #[test]
    fn strips_trailing_commentary() {
        let raw = "{\"original_text\":\"a\",\"translated_text\":\"b\"}\nI hope this helps! :)";
        assert_eq!(normalize(raw), r#"{"original_text":"a","translated_text":"b"}"#);
    }

    #[test]
    fn strips_code_fences() {
        let raw = "```json\n{\"original_text\": \"I eat rice\", \"translated_text\": \"আমি ভাত খাই\"}\n```";
        assert_eq!(
            normalize(raw),
            r#"{"original_text": "I eat rice", "translated_text": "আমি ভাত খাই"}"#
        );
    }

    #[test]
    fn keeps_nested_braces_up_to_the_last_close() {
        let raw = "x {\"a\": {\"b\": 1}} y } z";
        assert_eq!(normalize(raw), "{\"a\": {\"b\": 1}} y }");
    }

    #[test]
    fn strips_note_and_disclaimer_lines() {
        let raw = "Note: the register is informal.\nDISCLAIMER: machine output\n{\"a\": 1}";
        assert_eq!(normalize(raw), r#"{"a": 1}"#);
    }

    #[test]
    fn commentary_without_json_is_consumed() {
        assert_eq!(normalize("Note: nothing to translate"), "");
        assert_eq!(normalize("Note: first\nplain answer"), "plain answer");
    }

    #[test]
    fn truncated_object_keeps_its_tail() {
        let raw = "Here you go {\"original_text\": \"hi\", \"translated_text\": \"bonj";
        assert_eq!(normalize(raw), "{\"original_text\": \"hi\", \"translated_text\": \"bonj");
    }

    #[test]
    fn no_brace_returns_trimmed_input() {
        assert_eq!(normalize("  just some text }  "), "just some text }");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn result_starts_at_first_brace() {
        let raw = "prefix } junk {\"k\": \"v\"} tail";
        let out = normalize(raw);
        assert!(out.starts_with('{'));
        assert_eq!(out, r#"{"k": "v"}"#);
    }

    #[test]
    fn commentary_line_carrying_the_object_keeps_it() {
        let raw = "Note: here it is {\"original_text\":\"a\",\"translated_text\":\"b\"}";
        assert_eq!(normalize(raw), r#"{"original_text":"a","translated_text":"b"}"#);

        let raw = "Disclaimer: machine output {\n\"original_text\":\"a\",\n\"translated_text\":\"b\"}";
        assert_eq!(normalize(raw), "{\n\"original_text\":\"a\",\n\"translated_text\":\"b\"}");
    }

    #[test]
    fn result_begins_at_first_brace_of_input() {
        let inputs = [
            "Assistant: Note: informal\nDisclaimer: draft {\"a\": 1}",
            "model:\nNOTE: {\"a\": {\"b\": 2}} bye",
            "Note: first\nnote: second {\"a\"",
            "assistant: disclaimer: {",
        ];
        for raw in inputs {
            let out = normalize(raw);
            let first_brace = raw.find('{').unwrap();
            assert!(!out.is_empty(), "{raw:?}");
            assert!(out.starts_with('{'), "{raw:?}");
            assert_eq!(out.as_ptr() as usize - raw.as_ptr() as usize, first_brace, "{raw:?}");
        }
    }
}
