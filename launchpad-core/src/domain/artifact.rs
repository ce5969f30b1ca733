//! Artifact domain types

use serde::{Deserialize, Serialize};

/// A file produced by a build, retrievable via URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub url: String,
    #[serde(default)]
    pub path: Option<String>,
}
