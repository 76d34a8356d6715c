// Best-effort recovery of the JSON object the agent was asked to return.
//
// Deliberately greedy: first '{' to last '}'. Output holding several objects,
// or prose with stray braces, comes back as a parse failure (or the wrong
// object) rather than being repaired. Keep it that way unless the agent's
// response contract changes.

use serde_json::Value;

use crate::models::{ExtractedResult, FallbackResponse};

/// Turns a decoded Agent Engine response body into what the caller sees.
/// `raw` is the undecoded body, echoed back when there is no `output` field.
pub fn extract_result(response: &Value, raw: &str) -> ExtractedResult {
    match response.get("output") {
        None => ExtractedResult::Fallback(FallbackResponse::unexpected_format(raw)),
        Some(Value::String(text)) => match extract_json_block(text) {
            Some(value) => ExtractedResult::Agent(value),
            None => ExtractedResult::Fallback(FallbackResponse::unparsable(text)),
        },
        Some(structured) => ExtractedResult::Agent(structured.clone()),
    }
}

/// Parses the span from the first `{` to the last `}` inclusive.
pub fn extract_json_block(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
