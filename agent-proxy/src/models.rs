use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNPARSABLE_TEXT_NOTE: &str = "agent returned unparsable text response";
pub const UNEXPECTED_FORMAT_NOTE: &str = "unexpected response format";

/// Inbound body after validation. Values are kept untyped; only key
/// presence is enforced (see `api::validate`).
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProxyRequest {
    pub query: Value,
    pub constraint: Value,
}

impl AgentProxyRequest {
    pub fn query_text(&self) -> String {
        render_field(&self.query)
    }

    pub fn constraint_text(&self) -> String {
        render_field(&self.constraint)
    }
}

/// Strings verbatim, `null` as empty, everything else as its JSON text.
fn render_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Agent Engine REST envelope
#[derive(Debug, Serialize)]
pub struct AgentQueryEnvelope<'a> {
    pub input: AgentQueryInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct AgentQueryInput<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
}

/// Wrapper returned when the agent's reply can't be turned into JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackResponse {
    pub response: String,
    pub note: String,
}

impl FallbackResponse {
    pub fn unparsable(output: &str) -> Self {
        Self {
            response: output.to_string(),
            note: UNPARSABLE_TEXT_NOTE.to_string(),
        }
    }

    pub fn unexpected_format(raw: &str) -> Self {
        Self {
            response: raw.to_string(),
            note: UNEXPECTED_FORMAT_NOTE.to_string(),
        }
    }
}

/// What the proxy hands back to the caller on a 200.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedResult {
    Agent(Value),
    Fallback(FallbackResponse),
}

impl ExtractedResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExtractedResult::Fallback(_))
    }
}

impl Serialize for ExtractedResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExtractedResult::Agent(value) => value.serialize(serializer),
            ExtractedResult::Fallback(fallback) => fallback.serialize(serializer),
        }
    }
}
