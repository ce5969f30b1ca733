//! Object storage endpoints

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::sync::Arc;

use crate::auth::AccessTokenSource;
use crate::error::{ClientError, Result};
use crate::handle_empty_response;

const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.googleapis.com";
const READ_WRITE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// Client for the Cloud Storage JSON API
#[derive(Clone)]
pub struct StorageClient {
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
    client: Client,
}

impl StorageClient {
    pub fn new(tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self {
            base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            tokens,
            client: Client::new(),
        }
    }

    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid storage URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("Storage URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Download an object's contents as text
    pub async fn download(&self, bucket: &str, object: &str) -> Result<String> {
        let token = self.tokens.access_token(&[READ_WRITE_SCOPE]).await?;
        let url = self.url(&["storage", "v1", "b", bucket, "o", object])?;

        let response = self
            .client
            .get(url)
            .query(&[("alt", "media")])
            .bearer_auth(&token)
            .send()
            .await?;

        let response = handle_empty_response(response).await?;
        let body = response.text().await?;

        tracing::debug!("Downloaded gs://{}/{} ({} bytes)", bucket, object, body.len());

        Ok(body)
    }

    /// Upload a JSON document readable by anyone
    pub async fn upload_public_json(&self, bucket: &str, object: &str, body: String) -> Result<()> {
        let token = self.tokens.access_token(&[READ_WRITE_SCOPE]).await?;
        let url = self.url(&["upload", "storage", "v1", "b", bucket, "o"])?;

        let response = self
            .client
            .post(url)
            .query(&[
                ("uploadType", "media"),
                ("name", object),
                ("predefinedAcl", "publicRead"),
            ])
            .bearer_auth(&token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        handle_empty_response(response).await?;

        tracing::debug!("Uploaded gs://{}/{}", bucket, object);

        Ok(())
    }
}
