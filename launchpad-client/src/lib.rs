//! Launchpad HTTP Clients
//!
//! Typed clients for the remote services the deployment orchestrator talks to:
//! - [`CircleClient`]: the CI service (projects, builds, artifacts, job triggers)
//! - [`StorageClient`]: object storage (config download, public JSON upload)
//! - [`IamClient`]: service-account key creation and revocation
//! - [`BillingClient`]: Cloud Billing SKU catalog
//!
//! None of the clients retry or enforce timeouts; callers own that policy.
//!
//! # Example
//!
//! ```no_run
//! use launchpad_client::CircleClient;
//!
//! # async fn example() -> launchpad_client::Result<()> {
//! let client = CircleClient::new("https://circleci.com/api/v1.1", "token")
//!     .with_project_slug("github", "DataBiosphere");
//!
//! let build = client.get_build("saturn-ui", 1234).await?;
//! println!("Build {} outcome: {:?}", build.build_num, build.outcome);
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod billing;
mod builds;
pub mod error;
mod iam;
mod projects;
mod storage;

// Re-export commonly used types
pub use auth::{AccessTokenSource, GcpTokenSource, StaticTokenSource};
pub use billing::BillingClient;
pub use error::{ClientError, Result};
pub use iam::{CLOUD_PLATFORM_SCOPE, IamClient};
pub use storage::StorageClient;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::fmt;

/// Default API root of the CI service
pub const DEFAULT_CIRCLE_BASE_URL: &str = "https://circleci.com/api/v1.1";

/// Fully buffered response from the CI service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status code is in [200, 299]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Deserialize the body, failing on a non-2xx status
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(ClientError::api_error(self.status, self.body.clone()));
        }

        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// HTTP client for the CI service REST API
///
/// Every request carries the access token as the `circle-token` query parameter.
#[derive(Clone)]
pub struct CircleClient {
    /// API root (e.g., "https://circleci.com/api/v1.1")
    base_url: String,
    /// Static access token
    token: String,
    /// VCS type segment of project paths
    vcs_type: String,
    /// Organization segment of project paths
    org: String,
    /// HTTP client instance
    client: Client,
}

impl fmt::Debug for CircleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircleClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("vcs_type", &self.vcs_type)
            .field("org", &self.org)
            .finish()
    }
}

impl CircleClient {
    /// Create a new CI client
    ///
    /// # Arguments
    /// * `base_url` - The API root (e.g., "https://circleci.com/api/v1.1")
    /// * `token` - Access token appended to every request
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new CI client with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            vcs_type: "github".to_string(),
            org: String::new(),
            client,
        }
    }

    /// Set the VCS type and organization used to build project paths
    pub fn with_project_slug(
        mut self,
        vcs_type: impl Into<String>,
        org: impl Into<String>,
    ) -> Self {
        self.vcs_type = vcs_type.into();
        self.org = org.into();
        self
    }

    /// Get the API root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path of a project, relative to the API root
    pub(crate) fn project_path(&self, repo: &str) -> String {
        format!("/project/{}/{}/{}", self.vcs_type, self.org, repo)
    }

    /// Issue an authenticated request and buffer the whole response
    ///
    /// Non-2xx statuses are returned as data, not as errors.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .query(&[("circle-token", &self.token)])
            .header(ACCEPT, "*/*");

        if let Some(body) = body {
            let payload = serde_json::to_string_pretty(body).map_err(|e| {
                ClientError::InvalidRequest(format!("Failed to encode request body: {}", e))
            })?;
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload + "\n");
        }

        tracing::debug!("{} {}", method, path);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }

    /// GET a path and deserialize the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await?.json()
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize the JSON body
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let response = handle_empty_response(response).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Check the status code of a response whose body is not needed
pub(crate) async fn handle_empty_response(
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(response)
}
