//! Build domain types

use serde::{Deserialize, Serialize};

/// One execution record of a CI pipeline
///
/// Read-only snapshot; a fresh copy is fetched on every poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub build_num: u64,
    #[serde(default)]
    pub workflows: Option<Workflow>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub previous_successful_build: Option<BuildRef>,
}

/// Workflow metadata attached to a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub job_name: String,
}

/// Pointer to another build by number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    pub build_num: u64,
}

/// Terminal status of a build
///
/// Absent while the build is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failed,
    Canceled,
    InfrastructureFail,
    Timedout,
    NoTests,
    #[serde(other)]
    Unknown,
}

impl Build {
    /// Name of the workflow job that produced this build
    pub fn job_name(&self) -> Option<&str> {
        self.workflows.as_ref().map(|w| w.job_name.as_str())
    }

    /// Whether the build has reached a terminal outcome
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of the previous successful build, if the CI service reported one
    pub fn previous_successful(&self) -> Option<u64> {
        self.previous_successful_build.map(|r| r.build_num)
    }
}
