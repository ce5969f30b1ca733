//! IAM service-account key endpoints

use base64::Engine;
use launchpad_core::domain::credential::ServiceAccountKey;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::AccessTokenSource;
use crate::error::{ClientError, Result};
use crate::{handle_empty_response, handle_response};

/// OAuth2 scope used for IAM calls
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const DEFAULT_IAM_BASE_URL: &str = "https://iam.googleapis.com";

/// Client for creating and revoking service-account keys
#[derive(Clone)]
pub struct IamClient {
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
    client: Client,
}

/// Key resource returned by the create call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedKey {
    name: String,
    private_key_data: String,
}

impl IamClient {
    pub fn new(tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self {
            base_url: DEFAULT_IAM_BASE_URL.to_string(),
            tokens,
            client: Client::new(),
        }
    }

    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Identifier of the project the process runs in
    pub async fn project_id(&self) -> Result<String> {
        self.tokens.project_id().await
    }

    /// Email of a project's App Engine default service account
    pub fn app_engine_default_account(project_id: &str) -> String {
        format!("{}@appspot.gserviceaccount.com", project_id)
    }

    /// Create a new key for a service account
    ///
    /// The returned key material is already base64-decoded.
    pub async fn create_key(&self, service_account_email: &str) -> Result<ServiceAccountKey> {
        let token = self.tokens.access_token(&[CLOUD_PLATFORM_SCOPE]).await?;
        let url = format!(
            "{}/v1/projects/-/serviceAccounts/{}/keys",
            self.base_url, service_account_email
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let created: CreatedKey = handle_response(response).await?;
        let material = decode_key_material(&created.private_key_data)?;

        tracing::debug!("Created service account key {}", created.name);

        Ok(ServiceAccountKey {
            name: created.name,
            material,
        })
    }

    /// Revoke a key by its resource name
    pub async fn delete_key(&self, key_name: &str) -> Result<()> {
        let token = self.tokens.access_token(&[CLOUD_PLATFORM_SCOPE]).await?;
        let url = format!("{}/v1/{}", self.base_url, key_name);

        let response = self.client.delete(&url).bearer_auth(&token).send().await?;
        handle_empty_response(response).await?;

        tracing::debug!("Deleted service account key {}", key_name);

        Ok(())
    }
}

fn decode_key_material(encoded: &str) -> Result<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| ClientError::ParseError(format!("Invalid key material encoding: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| ClientError::ParseError(format!("Key material is not UTF-8: {}", e)))
}
