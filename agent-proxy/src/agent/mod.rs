// Agent Client: one authenticated call to the Vertex AI Agent Engine
// `:query` method per inbound request. No retries.

pub mod credentials;
pub mod extract;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::models::{AgentQueryEnvelope, AgentQueryInput, ExtractedResult};
use credentials::CredentialProvider;

#[derive(Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl AgentClient {
    pub fn new(http: reqwest::Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { http, credentials }
    }

    pub async fn query(
        &self,
        api_url: &str,
        message: &str,
        session_id: &str,
    ) -> Result<ExtractedResult, ApiError> {
        let upstream = |details: String, api_response: Option<String>| ApiError::Upstream {
            details,
            api_url: api_url.to_string(),
            api_response,
        };

        let token = self.credentials.access_token().await.map_err(|e| {
            error!("Credential lookup failed: {}", e);
            upstream(e.to_string(), None)
        })?;

        let envelope = AgentQueryEnvelope {
            input: AgentQueryInput { message, session_id },
        };

        info!("Calling Agent Engine [{}]: {}", session_id, api_url);

        let resp = self
            .http
            .post(api_url)
            .bearer_auth(token)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                error!("API Call to Agent Engine failed: {}", e);
                upstream(e.to_string(), None)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            error!("Failed to read Agent Engine response: {}", e);
            upstream(e.to_string(), None)
        })?;

        if !status.is_success() {
            error!("Agent Engine returned {} for session {}", status, session_id);
            return Err(upstream(
                format!("{} error for url: {}", status, api_url),
                Some(body),
            ));
        }

        let response: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            error!("Agent Engine response is not JSON: {}", e);
            upstream(e.to_string(), Some(body.clone()))
        })?;

        let result = extract::extract_result(&response, &body);
        if result.is_fallback() {
            warn!("Agent response for session {} could not be parsed as JSON", session_id);
        }
        Ok(result)
    }
}
