use serde_json::Value;
use tracing::warn;

use super::interface::TranslationOutput;
use super::recovery::Mapping;

pub const ORIGINAL_TEXT: &str = "original_text";
pub const TRANSLATED_TEXT: &str = "translated_text";

/// Validator result: always a complete output, plus the fields that had to be defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOutput {
    pub output: TranslationOutput,
    pub defaulted_fields: Vec<&'static str>,
}

impl ValidatedOutput {
    /// True when at least one field was missing or not a string
    pub fn is_downgraded(&self) -> bool {
        !self.defaulted_fields.is_empty()
    }

    pub fn into_output(self) -> TranslationOutput {
        self.output
    }
}

fn read_string_field(
    mapping: &Mapping,
    key: &'static str,
    defaulted: &mut Vec<&'static str>,
) -> String {
    match mapping.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => {
            defaulted.push(key);
            String::new()
        }
    }
}

/// Fill the two-field schema from `mapping`; never fails.
///
/// Each field is read independently. A missing or non-string value becomes
/// `""` and is recorded in `defaulted_fields`. Extra keys are ignored.
pub fn validate(mapping: &Mapping) -> ValidatedOutput {
    let mut defaulted_fields = Vec::new();
    let original_text = read_string_field(mapping, ORIGINAL_TEXT, &mut defaulted_fields);
    let translated_text = read_string_field(mapping, TRANSLATED_TEXT, &mut defaulted_fields);

    if !defaulted_fields.is_empty() {
        warn!(
            fields = ?defaulted_fields,
            "ValidationDowngraded: model output did not match schema, using defaults"
        );
    }

    ValidatedOutput {
        output: TranslationOutput {
            original_text,
            translated_text,
        },
        defaulted_fields,
    }
}
