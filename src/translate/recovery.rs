//! Recovery of a JSON object from unreliable model output.
//!
//! Three stages, each usable on its own:
//!
//! 1. [`locate_object`] runs a brace-balance state machine from the first `{`
//!    and reports either a complete span or a truncated tail.
//! 2. [`repair_truncated`] closes a truncated tail: one `"` if the number of
//!    unescaped quotes is odd, then one `}`. Only a single missing level is
//!    repaired.
//! 3. [`parse_layered`] tries [`PARSE_LAYERS`] in order and keeps the first
//!    success. Results from different layers are never merged.
//!
//! The brace scan does not track string literals: a `}` inside a value
//! closes the span early.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::RecoveryError;

/// Parse result: string-keyed mapping of arbitrary JSON values
pub type Mapping = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekStart,
    InObject(usize),
    Done,
}

/// Brace-balance scanner fed one character at a time
#[derive(Debug, Clone)]
pub struct BraceScanner {
    state: ScanState,
    start: usize,
    end: usize,
}

impl BraceScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::SeekStart,
            start: 0,
            end: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Advance over `ch`, found at byte offset `idx` of the scanned text.
    pub fn feed(&mut self, idx: usize, ch: char) -> ScanState {
        self.state = match (self.state, ch) {
            (ScanState::SeekStart, '{') => {
                self.start = idx;
                ScanState::InObject(1)
            }
            (ScanState::InObject(depth), '{') => ScanState::InObject(depth + 1),
            (ScanState::InObject(1), '}') => {
                self.end = idx + ch.len_utf8();
                ScanState::Done
            }
            (ScanState::InObject(depth), '}') => ScanState::InObject(depth - 1),
            (state, _) => state,
        };
        self.state
    }
}

impl Default for BraceScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate object region found by [`locate_object`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSpan<'a> {
    /// Balanced `{ ... }`
    Complete(&'a str),
    /// From the first `{` to end of text; depth never returned to zero
    Truncated(&'a str),
}

impl<'a> ObjectSpan<'a> {
    /// Text handed to the parse layers; truncated spans are repaired first.
    pub fn into_json_text(self) -> Cow<'a, str> {
        match self {
            ObjectSpan::Complete(span) => Cow::Borrowed(span),
            ObjectSpan::Truncated(span) => {
                let repaired = repair_truncated(span);
                debug!(original_len = span.len(), "repaired truncated JSON object");
                Cow::Owned(repaired)
            }
        }
    }
}

pub fn locate_object(text: &str) -> Result<ObjectSpan<'_>, RecoveryError> {
    let mut scanner = BraceScanner::new();
    for (idx, ch) in text.char_indices() {
        if scanner.feed(idx, ch) == ScanState::Done {
            break;
        }
    }

    match scanner.state() {
        ScanState::SeekStart => Err(RecoveryError::NoJsonFound),
        ScanState::InObject(_) => Ok(ObjectSpan::Truncated(&text[scanner.start..])),
        ScanState::Done => Ok(ObjectSpan::Complete(&text[scanner.start..scanner.end])),
    }
}

/// Count `"` characters not preceded by an odd run of backslashes.
pub fn count_unescaped_quotes(text: &str) -> usize {
    let mut count = 0;
    let mut backslashes = 0;
    for ch in text.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                if backslashes % 2 == 0 {
                    count += 1;
                }
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    count
}

/// Close a truncated object: one quote if a string is left open, then one brace.
pub fn repair_truncated(span: &str) -> String {
    let mut repaired = String::with_capacity(span.len() + 2);
    repaired.push_str(span);
    if count_unescaped_quotes(span) % 2 == 1 {
        repaired.push('"');
    }
    repaired.push('}');
    repaired
}

pub type ParseFn = fn(&str) -> Result<Mapping, String>;

/// One parse strategy; pure and independent of the others
#[derive(Debug, Clone, Copy)]
pub struct ParseLayer {
    pub name: &'static str,
    pub parse: ParseFn,
}

/// Parse strategies, each strictly more permissive than the previous one
pub const PARSE_LAYERS: [ParseLayer; 3] = [
    ParseLayer {
        name: "strict",
        parse: parse_strict,
    },
    ParseLayer {
        name: "json5",
        parse: parse_json5,
    },
    ParseLayer {
        name: "cleanup",
        parse: parse_after_cleanup,
    },
];

static TRAILING_COMMA_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));

static TRAILING_COMMA_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));

pub fn parse_strict(text: &str) -> Result<Mapping, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Unquoted keys, single quotes, trailing commas
pub fn parse_json5(text: &str) -> Result<Mapping, String> {
    json5::from_str(text).map_err(|e| e.to_string())
}

/// Collapse newlines to spaces and drop commas before `}` / `]`.
pub fn cleanup(text: &str) -> String {
    let collapsed = text.replace("\r\n", " ").replace('\n', " ");
    let collapsed = TRAILING_COMMA_OBJECT.replace_all(&collapsed, "}");
    TRAILING_COMMA_ARRAY.replace_all(&collapsed, "]").into_owned()
}

pub fn parse_after_cleanup(text: &str) -> Result<Mapping, String> {
    parse_strict(&cleanup(text))
}

/// Try every layer in order; the last layer's error is kept on total failure.
pub fn parse_layered(json_text: &str) -> Result<Mapping, RecoveryError> {
    let mut last_error = String::new();
    for layer in &PARSE_LAYERS {
        match (layer.parse)(json_text) {
            Ok(mapping) => {
                debug!(layer = layer.name, "parsed model output");
                return Ok(mapping);
            }
            Err(e) => {
                debug!(layer = layer.name, error = %e, "parse layer failed");
                last_error = e;
            }
        }
    }
    Err(RecoveryError::JsonRepairFailed(last_error))
}

/// Locate, repair if truncated, and parse the first JSON object in `text`.
pub fn recover_mapping(text: &str) -> Result<Mapping, RecoveryError> {
    let json_text = locate_object(text)?.into_json_text();
    parse_layered(&json_text)
}
