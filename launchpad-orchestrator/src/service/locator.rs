//! Build Locator
//!
//! Resolves a project name to the most recent successful build produced by the
//! expected workflow job on the tracked branch.

use launchpad_core::domain::build::Build;
use tracing::{debug, info};

use crate::config::Config;
use crate::repository::BuildRepository;
use crate::service::error::DeployError;

/// A project's CI repository name and its last green build on the tracked branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    pub reponame: String,
    pub last_success: u64,
}

/// Build found by [`find_last_successful_build`]
#[derive(Debug, Clone)]
pub struct LocatedBuild {
    pub reponame: String,
    pub build: Build,
}

/// Find the CI project whose repository URL matches `project`
///
/// The first match in service order wins.
pub async fn locate_project(
    builds: &dyn BuildRepository,
    config: &Config,
    project: &str,
) -> Result<ProjectLocation, DeployError> {
    let repo_url = config.repo_url(project);
    let projects = builds.list_projects().await?;

    let found = projects
        .into_iter()
        .find(|p| p.vcs_url == repo_url)
        .ok_or_else(|| DeployError::ProjectNotFound(project.to_string()))?;

    let last_success = found
        .last_success_on(&config.tracked_branch)
        .ok_or_else(|| DeployError::NoSuccessfulBuild {
            project: project.to_string(),
            branch: config.tracked_branch.clone(),
        })?;

    Ok(ProjectLocation {
        reponame: found.reponame,
        last_success,
    })
}

/// Walk back through previous-successful links until a build of `expected_job`
///
/// Performs at most `max_attempts + 1` fetches.
pub async fn find_build(
    builds: &dyn BuildRepository,
    reponame: &str,
    starting_build_num: u64,
    max_attempts: u32,
    expected_job: &str,
) -> Result<Build, DeployError> {
    let mut build_num = starting_build_num;

    for attempt in 0..=max_attempts {
        let build = builds.get_build(reponame, build_num).await?;

        if build.job_name() == Some(expected_job) {
            return Ok(build);
        }

        debug!(
            "Build {} of {} is job {:?}, not {} (attempt {}/{})",
            build_num,
            reponame,
            build.job_name(),
            expected_job,
            attempt.saturating_add(1),
            max_attempts.saturating_add(1)
        );

        match build.previous_successful() {
            Some(previous) => build_num = previous,
            None => break,
        }
    }

    Err(DeployError::NotFound {
        last_build_num: build_num,
    })
}

/// Latest successful build of `project` produced by the configured build job
pub async fn find_last_successful_build(
    builds: &dyn BuildRepository,
    config: &Config,
    project: &str,
) -> Result<LocatedBuild, DeployError> {
    let location = locate_project(builds, config, project).await?;

    let build = find_build(
        builds,
        &location.reponame,
        location.last_success,
        config.build_search_attempts,
        &config.build_job_name,
    )
    .await?;

    info!(
        "Found build {} of {} on {}",
        build.build_num, location.reponame, config.tracked_branch
    );

    Ok(LocatedBuild {
        reponame: location.reponame,
        build,
    })
}
