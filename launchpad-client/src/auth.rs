//! Access tokens for Google Cloud APIs
//!
//! The storage and IAM clients take an [`AccessTokenSource`] rather than a
//! concrete provider, so they can run against application default credentials
//! in production and against a fixed token locally or in tests.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::{ClientError, Result};

/// Source of OAuth2 bearer tokens and of the ambient project id
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Returns a bearer token valid for the given scopes
    async fn access_token(&self, scopes: &[&str]) -> Result<String>;

    /// Returns the identifier of the project the process runs in
    async fn project_id(&self) -> Result<String>;
}

/// Token source backed by Google application default credentials
pub struct GcpTokenSource {
    provider: Arc<dyn gcp_auth::TokenProvider>,
}

// TokenProvider doesn't implement Debug
impl fmt::Debug for GcpTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcpTokenSource")
            .field("provider", &"<TokenProvider>")
            .finish()
    }
}

impl GcpTokenSource {
    /// Discovers credentials from the environment (metadata server,
    /// `GOOGLE_APPLICATION_CREDENTIALS`, or the gcloud CLI)
    pub async fn from_environment() -> Result<Self> {
        let provider = gcp_auth::provider().await.map_err(|e| {
            ClientError::Auth(format!("failed to initialize GCP authentication: {e}"))
        })?;

        Ok(Self { provider })
    }
}

#[async_trait]
impl AccessTokenSource for GcpTokenSource {
    async fn access_token(&self, scopes: &[&str]) -> Result<String> {
        let token = self
            .provider
            .token(scopes)
            .await
            .map_err(|e| ClientError::Auth(format!("failed to get GCP access token: {e}")))?;

        Ok(token.as_str().to_string())
    }

    async fn project_id(&self) -> Result<String> {
        let project_id = self
            .provider
            .project_id()
            .await
            .map_err(|e| ClientError::Auth(format!("failed to resolve GCP project id: {e}")))?;

        Ok(project_id.to_string())
    }
}

/// Token source that always hands out the same token and project id
#[derive(Clone)]
pub struct StaticTokenSource {
    token: String,
    project_id: String,
}

impl fmt::Debug for StaticTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenSource")
            .field("token", &"<redacted>")
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self, _scopes: &[&str]) -> Result<String> {
        Ok(self.token.clone())
    }

    async fn project_id(&self) -> Result<String> {
        Ok(self.project_id.clone())
    }
}
