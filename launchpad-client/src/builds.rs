//! Build-related CI endpoints

use crate::error::{ClientError, Result};
use crate::{CircleClient, RawResponse};
use launchpad_core::domain::artifact::Artifact;
use launchpad_core::domain::build::Build;
use launchpad_core::dto::trigger::TriggerBuildRequest;
use reqwest::Method;

impl CircleClient {
    // =============================================================================
    // Build Lookup
    // =============================================================================

    /// Get a single build of a project
    ///
    /// # Arguments
    /// * `repo` - The CI repository name
    /// * `build_num` - The build number
    pub async fn get_build(&self, repo: &str, build_num: u64) -> Result<Build> {
        let path = format!("{}/{}", self.project_path(repo), build_num);
        self.get_json(&path).await
    }

    /// List the artifacts produced by a build
    ///
    /// # Returns
    /// The artifacts in the order the CI service returns them
    pub async fn list_artifacts(&self, repo: &str, build_num: u64) -> Result<Vec<Artifact>> {
        let path = format!("{}/{}/artifacts", self.project_path(repo), build_num);
        self.get_json(&path).await
    }

    // =============================================================================
    // Job Trigger
    // =============================================================================

    /// Trigger a new build on a branch
    ///
    /// The raw response is returned so the caller can inspect and relay a
    /// rejected submission.
    ///
    /// # Arguments
    /// * `repo` - The CI repository name
    /// * `branch` - The branch to build
    /// * `req` - Build parameters for the new job
    pub async fn trigger_build(
        &self,
        repo: &str,
        branch: &str,
        req: &TriggerBuildRequest,
    ) -> Result<RawResponse> {
        let path = format!("{}/tree/{}", self.project_path(repo), branch);
        let body = serde_json::to_value(req).map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to encode trigger request: {}", e))
        })?;

        self.request(Method::POST, &path, Some(&body)).await
    }
}
