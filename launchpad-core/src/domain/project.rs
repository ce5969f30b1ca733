//! Project domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::build::BuildRef;

/// A project followed by the CI service
///
/// Only the fields needed to locate the last successful build are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub vcs_url: String,
    pub reponame: String,
    #[serde(default)]
    pub branches: HashMap<String, Branch>,
}

/// Per-branch build summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub last_success: Option<BuildRef>,
}

impl Project {
    /// Number of the last successful build on `branch`, if any
    pub fn last_success_on(&self, branch: &str) -> Option<u64> {
        self.branches
            .get(branch)
            .and_then(|b| b.last_success.as_ref())
            .map(|r| r.build_num)
    }
}
