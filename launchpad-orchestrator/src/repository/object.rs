//! Object Repository
//!
//! Reads and writes of single objects in object storage.

use async_trait::async_trait;
use launchpad_client::{Result, StorageClient};

/// Repository trait for object storage
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// Downloads an object as text
    async fn download(&self, bucket: &str, object: &str) -> Result<String>;

    /// Writes a publicly readable JSON object
    async fn upload_public_json(&self, bucket: &str, object: &str, body: String) -> Result<()>;
}

#[async_trait]
impl ObjectRepository for StorageClient {
    async fn download(&self, bucket: &str, object: &str) -> Result<String> {
        StorageClient::download(self, bucket, object).await
    }

    async fn upload_public_json(&self, bucket: &str, object: &str, body: String) -> Result<()> {
        StorageClient::upload_public_json(self, bucket, object, body).await
    }
}
