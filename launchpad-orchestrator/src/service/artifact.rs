//! Artifact Resolver

use launchpad_core::domain::build::Build;

use crate::repository::BuildRepository;
use crate::service::error::DeployError;

/// URL of the first artifact of `build`, in the order the CI service lists them
pub async fn first_artifact_url(
    builds: &dyn BuildRepository,
    reponame: &str,
    build: &Build,
) -> Result<String, DeployError> {
    let artifacts = builds.list_artifacts(reponame, build.build_num).await?;

    artifacts
        .into_iter()
        .next()
        .map(|artifact| artifact.url)
        .ok_or(DeployError::NoArtifacts {
            build_num: build.build_num,
        })
}
