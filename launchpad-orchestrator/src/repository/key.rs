//! Key Repository
//!
//! Runtime identity and service-account key lifecycle.

use async_trait::async_trait;
use launchpad_client::{IamClient, Result};
use launchpad_core::domain::credential::ServiceAccountKey;

/// Repository trait for service-account keys
#[async_trait]
pub trait KeyRepository: Send + Sync {
    /// Identifier of the project the service runs in
    async fn project_id(&self) -> Result<String>;

    /// Creates a key for the project's App Engine default service account
    async fn create_app_engine_key(&self, project_id: &str) -> Result<ServiceAccountKey>;

    /// Revokes a key by resource name
    async fn revoke_key(&self, key_name: &str) -> Result<()>;
}

#[async_trait]
impl KeyRepository for IamClient {
    async fn project_id(&self) -> Result<String> {
        IamClient::project_id(self).await
    }

    async fn create_app_engine_key(&self, project_id: &str) -> Result<ServiceAccountKey> {
        self.create_key(&IamClient::app_engine_default_account(project_id))
            .await
    }

    async fn revoke_key(&self, key_name: &str) -> Result<()> {
        self.delete_key(key_name).await
    }
}
