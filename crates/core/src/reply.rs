//! Helpers for JSON replies written by a language model.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Content of the first fenced block, with an optional `json` tag. An
/// unterminated fence runs to the end of the text.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\n?(.*?)(?:```|\z)").expect("valid regex")
});

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fences(raw: &str) -> &str {
    match FENCE_RE.captures(raw).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim(),
        None => raw.trim(),
    }
}

/// Strip fences and decode. The error carries the serde message, not the
/// reply itself.
pub fn parse_json_reply<T: DeserializeOwned>(raw: &str) -> Result<T, CoreError> {
    serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| CoreError::Validation(format!("model reply is not valid JSON: {e}")))
}
