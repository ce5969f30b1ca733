//! CI job trigger DTOs

use serde::{Deserialize, Serialize};

/// Body of a "trigger new build" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerBuildRequest {
    pub build_parameters: BuildParameters,
}

/// Parameters handed to the triggered job as environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildParameters {
    #[serde(rename = "CIRCLE_JOB")]
    pub circle_job: String,
    #[serde(rename = "ARTIFACT_URL")]
    pub artifact_url: String,
    #[serde(rename = "CONFIG_JSON", skip_serializing_if = "Option::is_none")]
    pub config_json: Option<String>,
    #[serde(rename = "SA_KEY_JSON")]
    pub sa_key_json: String,
}

/// Successful trigger response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredBuild {
    pub build_num: u64,
}
