// Workload-identity credentials for the Agent Engine call.

use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("application default credentials: {0}")]
    Adc(#[from] gcp_auth::Error),

    #[error("no credentials available: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// OAuth2 bearer token for the cloud-platform scope.
    async fn access_token(&self) -> Result<String, CredentialError>;
}

/// Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`, then
/// the gcloud ADC file, then the metadata server, then the gcloud CLI.
///
/// Discovery runs on the first token request, so a process without
/// credentials still starts and reports the failure per request.
#[derive(Default)]
pub struct ApplicationDefaultCredentials {
    provider: OnceCell<Arc<dyn TokenProvider>>,
}

impl ApplicationDefaultCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    async fn provider(&self) -> Result<&Arc<dyn TokenProvider>, CredentialError> {
        self.provider
            .get_or_try_init(|| async {
                let provider = gcp_auth::provider().await?;
                info!("Resolved application default credentials");
                Ok::<_, CredentialError>(provider)
            })
            .await
    }
}

#[async_trait]
impl CredentialProvider for ApplicationDefaultCredentials {
    async fn access_token(&self) -> Result<String, CredentialError> {
        let provider = self.provider().await?;
        debug!("Requesting token for scope {}", CLOUD_PLATFORM_SCOPE);
        let token = provider.token(&[CLOUD_PLATFORM_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }
}

/// Fixed token, for local runs (`gcloud auth print-access-token`) and tests.
pub struct StaticTokenCredentials {
    token: String,
}

impl StaticTokenCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenCredentials {
    async fn access_token(&self) -> Result<String, CredentialError> {
        if self.token.is_empty() {
            return Err(CredentialError::Unavailable("static access token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}
