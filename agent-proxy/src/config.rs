use anyhow::Result;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://us-central1-aiplatform.googleapis.com/v1/";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Reasoning Engine resource path, e.g.
    /// `projects/p/locations/us-central1/reasoningEngines/123`.
    pub agent_id: Option<String>,
    pub api_base_url: String,
    pub agent_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub static_access_token: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()?,
            agent_id: non_empty(lookup("VERTEX_AGENT_ID")),
            api_base_url: lookup("AGENT_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            agent_timeout_secs: lookup("AGENT_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()?,
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .unwrap_or_else(|| "1048576".to_string())
                .parse()?,
            static_access_token: non_empty(lookup("GOOGLE_OAUTH_ACCESS_TOKEN")),
            log_level: lookup("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Full `:query` URL for the configured agent, if one is set.
    pub fn agent_url(&self) -> Option<String> {
        self.agent_id
            .as_deref()
            .map(|agent_id| format!("{}{}:query", self.api_base_url, agent_id))
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
