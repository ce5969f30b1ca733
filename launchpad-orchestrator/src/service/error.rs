//! Service error types

use launchpad_client::ClientError;
use thiserror::Error;

/// Failure of a deploy workflow
#[derive(Debug, Error)]
pub enum DeployError {
    /// No CI project has the expected repository URL
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// The tracked branch has never had a successful build
    #[error("No successful build of {project} on branch {branch}")]
    NoSuccessfulBuild { project: String, branch: String },

    /// The previous-successful-build chain ran out before a matching build
    #[error("Build not found (last build number: {last_build_num})")]
    NotFound { last_build_num: u64 },

    /// The resolved build produced no artifacts
    #[error("No artifacts found for build {build_num}")]
    NoArtifacts { build_num: u64 },

    /// The CI service rejected the deploy submission
    #[error("Circle returned status code {status}.")]
    Upstream { status: u16, body: String },

    /// The deploy build did not finish within the polling budget
    #[error("Timeout waiting for build {build_num} to complete")]
    Timeout { build_num: u64 },

    /// A service-account key could not be created
    #[error("Failed to create service account key: {0}")]
    Credential(#[source] ClientError),

    /// Any other remote call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Failure of the download price publisher
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("googleCloudBillingKey is not configured")]
    MissingBillingKey,

    #[error("SKU {0} not found in billing catalog")]
    SkuNotFound(String),

    #[error("SKU {0} has no pricing info")]
    NoPricingInfo(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
