//! Build Repository
//!
//! CI service operations: project listing, build lookup, artifacts and job triggers.

use async_trait::async_trait;
use launchpad_client::{CircleClient, RawResponse, Result};
use launchpad_core::domain::artifact::Artifact;
use launchpad_core::domain::build::Build;
use launchpad_core::domain::project::Project;
use launchpad_core::dto::trigger::TriggerBuildRequest;

/// Repository trait for CI operations
#[async_trait]
pub trait BuildRepository: Send + Sync {
    /// Lists every project known to the CI service
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Fetches a single build
    async fn get_build(&self, repo: &str, build_num: u64) -> Result<Build>;

    /// Lists the artifacts of a build, in service order
    async fn list_artifacts(&self, repo: &str, build_num: u64) -> Result<Vec<Artifact>>;

    /// Submits a new build; a rejected submission is returned, not raised
    async fn trigger_build(
        &self,
        repo: &str,
        branch: &str,
        req: &TriggerBuildRequest,
    ) -> Result<RawResponse>;
}

#[async_trait]
impl BuildRepository for CircleClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        CircleClient::list_projects(self).await
    }

    async fn get_build(&self, repo: &str, build_num: u64) -> Result<Build> {
        CircleClient::get_build(self, repo, build_num).await
    }

    async fn list_artifacts(&self, repo: &str, build_num: u64) -> Result<Vec<Artifact>> {
        CircleClient::list_artifacts(self, repo, build_num).await
    }

    async fn trigger_build(
        &self,
        repo: &str,
        branch: &str,
        req: &TriggerBuildRequest,
    ) -> Result<RawResponse> {
        CircleClient::trigger_build(self, repo, branch, req).await
    }
}
