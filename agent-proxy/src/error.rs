use serde_json::json;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{reject::Reject, Rejection, Reply};

use crate::middleware;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing 'query' or 'constraint' in JSON body.";
pub const MISSING_AGENT_ID_MESSAGE: &str = "Configuration Error: Agent ID environment variable (VERTEX_AGENT_ID) not set. Check deployment command.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to call Vertex AI Agent Engine.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Upstream error calling {api_url}: {details}")]
    Upstream {
        details: String,
        api_url: String,
        api_response: Option<String>,
    },

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl Reject for ApiError {}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }

    pub fn missing_agent_id() -> Self {
        ApiError::Configuration(MISSING_AGENT_ID_MESSAGE.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Configuration(_) | ApiError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing JSON body.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(message) | ApiError::Configuration(message) => {
                json!({ "error": message })
            }
            ApiError::Upstream { details, api_url, api_response } => {
                let mut body = json!({
                    "error": UPSTREAM_FAILURE_MESSAGE,
                    "details": details,
                    "api_url": api_url,
                });
                if let Some(text) = api_response {
                    body["api_response"] = json!(text);
                }
                body
            }
            ApiError::PayloadTooLarge => json!({ "error": "Payload Too Large" }),
            ApiError::MethodNotAllowed => json!({ "error": "Method Not Allowed" }),
        }
    }

    pub fn to_response(&self) -> warp::reply::Response {
        let reply = warp::reply::with_status(warp::reply::json(&self.body()), self.status());
        middleware::with_cors(reply).into_response()
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(api_err) = err.find::<ApiError>() {
        return Ok(api_err.to_response());
    }

    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    let json = warp::reply::json(&json!({ "error": message }));
    Ok(middleware::with_cors(warp::reply::with_status(json, code)).into_response())
}
