//! Sanitising and parsing of completion responses.

use crate::error::FallbackReason;
use serde_json::Value;

/// Strips a surrounding markdown code fence (```` ```json ```` or bare ```` ``` ````).
///
/// Text without a leading fence is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };

    let body = body.trim_start();
    body.strip_suffix("```").unwrap_or(body).trim_end()
}

/// Parses a completion response into the raw assessment objects.
///
/// # Errors
///
/// - [`FallbackReason::UnparsableCompletionResponse`] when the text is not JSON or not an array.
/// - [`FallbackReason::EmptyCompletionResult`] when the array is empty.
pub fn parse_completion_response(text: &str) -> Result<Vec<Value>, FallbackReason> {
    let cleaned = strip_code_fences(text);
    let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
        FallbackReason::UnparsableCompletionResponse(format!("invalid JSON: {e}"))
    })?;

    match parsed {
        Value::Array(items) if items.is_empty() => Err(FallbackReason::EmptyCompletionResult),
        Value::Array(items) => Ok(items),
        other => Err(FallbackReason::UnparsableCompletionResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
