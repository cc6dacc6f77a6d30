use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::{Captures, Regex};

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("valid regex"));

/// Replace `${VAR_NAME}` placeholders with environment values.
/// Unset variables are left as written so the parse error points at them.
pub fn substitute_env_vars(content: &str) -> Cow<'_, str> {
    ENV_VAR_PATTERN.replace_all(content, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
}

/// Load text file with encoding detection
/// UTF-8 (with or without BOM) first, GBK as the fallback for legacy configs
pub fn load_text_file_with_guess_encoding(file_path: &Path) -> Result<String> {
    let mut buffer = fs::read(file_path)?;

    // Remove BOM if present
    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        buffer.drain(0..3);
    }

    match String::from_utf8(buffer) {
        Ok(content) => Ok(content),
        Err(err) => {
            let (cow, _, _) = encoding_rs::GBK.decode(err.as_bytes());
            Ok(cow.into_owned())
        }
    }
}
