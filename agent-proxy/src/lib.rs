use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use warp::{Filter, Rejection, Reply};

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod prompt;

use agent::credentials::{ApplicationDefaultCredentials, CredentialProvider, StaticTokenCredentials};
use agent::AgentClient;
use config::Config;
use metrics::Metrics;

/// Built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agent: AgentClient,
    pub metrics: Metrics,
}

impl AppState {
    /// Uses a static token when one is configured, otherwise Application
    /// Default Credentials.
    pub fn from_config(config: Config) -> Result<Self> {
        let http = http_client(&config)?;
        let credentials: Arc<dyn CredentialProvider> = match &config.static_access_token {
            Some(token) => {
                info!("Using static access token from GOOGLE_OAUTH_ACCESS_TOKEN");
                Arc::new(StaticTokenCredentials::new(token.clone()))
            }
            None => {
                info!("Using application default credentials");
                Arc::new(ApplicationDefaultCredentials::new())
            }
        };
        Self::with_credentials(config, http, credentials)
    }

    pub fn with_credentials(
        config: Config,
        http: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        Ok(Self {
            agent: AgentClient::new(http, credentials),
            metrics: Metrics::new()?,
            config: Arc::new(config),
        })
    }
}

/// Pooled outbound client; the timeout covers the whole agent call.
/// Token requests go through gcp_auth's own client.
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.agent_timeout())
        .build()?)
}

/// Every route plus the JSON rejection handler.
pub fn app(state: AppState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    api::routes(state).recover(error::handle_rejection)
}
