// Prompt Formatter: renders a request into the OBSERVE / REFLECT / LOOP
// message the recipe loop agent is deployed to expect.
//
// The LOOP instructions are what make the agent answer with a bare JSON
// object; `agent::extract` relies on them. Change them together.

pub const NO_CONSTRAINT_PLACEHOLDER: &str = "No additional constraint.";

pub const SECTION_LABELS: [&str; 3] = ["OBSERVE:", "REFLECT:", "LOOP:"];

/// Keys the agent is told to return.
pub const RESPONSE_KEYS: [&str; 4] = ["plan", "constraint_ack", "self_corrections", "session_id"];

pub fn format_agent_message(query: &str, constraint: &str, session_id: &str) -> String {
    let constraint_section = if constraint.is_empty() {
        NO_CONSTRAINT_PLACEHOLDER
    } else {
        constraint
    };

    [
        format!("SESSION_ID: {}", session_id),
        String::new(),
        "OBSERVE:".to_string(),
        "- Capture the incoming request exactly as received.".to_string(),
        format!("- Request: \"{}\"", query),
        format!("- Constraint: \"{}\"", constraint_section),
        String::new(),
        "REFLECT:".to_string(),
        "- Review the observation for missing context (missing steps, conflicting instructions).".to_string(),
        "- Call out any tensions or nutrition trade-offs before planning.".to_string(),
        String::new(),
        "LOOP:".to_string(),
        "- Produce a corrected cooking plan that explicitly mentions how you honored the constraint.".to_string(),
        "- Highlight a single self-correction you made after your reflection.".to_string(),
        "- **The ONLY output you provide MUST be a valid, unadulterated JSON object.**".to_string(),
        "- Answer in JSON with keys: plan (array of steps), constraint_ack (string), self_corrections (string), session_id (string).".to_string(),
        "- Close the loop by confirming the plan is ready to execute.".to_string(),
    ]
    .join("\n")
}
