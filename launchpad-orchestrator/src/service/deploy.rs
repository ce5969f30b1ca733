//! Deploy Service
//!
//! Promotes the latest green build of a project to production by triggering a
//! deploy job on the CI service and waiting for it to finish.

use launchpad_core::domain::build::Build;
use launchpad_core::dto::trigger::{BuildParameters, TriggerBuildRequest, TriggeredBuild};
use std::sync::Arc;
use tracing::info;

use crate::repository::BuildRepository;
use crate::service::error::DeployError;
use crate::service::{artifact, credentials, locator, poller};
use crate::state::AppState;

/// A deployable project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployTarget {
    /// Repository name of the project
    pub project: &'static str,
    /// Whether the production config blob is passed to the deploy job
    pub include_config: bool,
}

impl DeployTarget {
    pub const API: Self = Self {
        project: "saturn-api",
        include_config: true,
    };

    pub const UI: Self = Self {
        project: "saturn-ui",
        include_config: false,
    };
}

/// Deploy `target` and wait for the deploy build to finish
///
/// Returns the finished deploy build.
pub async fn deploy(state: &AppState, target: DeployTarget) -> Result<Build, DeployError> {
    let config = Arc::clone(&state.config);
    info!("Deploying {} to production", target.project);

    let located =
        locator::find_last_successful_build(state.builds.as_ref(), &config, target.project)
            .await?;
    let artifact_url =
        artifact::first_artifact_url(state.builds.as_ref(), &located.reponame, &located.build)
            .await?;

    info!("Deploying artifact {}", artifact_url);

    let config_json = if target.include_config {
        Some(
            state
                .objects
                .download(&config.prod_config_bucket, &config.prod_config_object)
                .await?,
        )
    } else {
        None
    };

    let builds = Arc::clone(&state.builds);
    let reponame = located.reponame;

    credentials::with_scoped_key(&state.keys, |sa_key_json| async move {
        let request = TriggerBuildRequest {
            build_parameters: BuildParameters {
                circle_job: config.deploy_job_name.clone(),
                artifact_url,
                config_json,
                sa_key_json,
            },
        };

        let build_num =
            submit(builds.as_ref(), &reponame, &config.tracked_branch, &request).await?;

        poller::wait_for_outcome(builds.as_ref(), &reponame, build_num, config.poll_policy())
            .await
    })
    .await
}

/// Submit the deploy job; a non-2xx answer is relayed as `Upstream`
async fn submit(
    builds: &dyn BuildRepository,
    reponame: &str,
    branch: &str,
    request: &TriggerBuildRequest,
) -> Result<u64, DeployError> {
    let response = builds.trigger_build(reponame, branch, request).await?;

    if !response.is_success() {
        return Err(DeployError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    let triggered: TriggeredBuild = response.json()?;
    info!(
        "Triggered {} build {} of {}",
        request.build_parameters.circle_job, triggered.build_num, reponame
    );

    Ok(triggered.build_num)
}
