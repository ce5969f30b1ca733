//! Orchestrator configuration
//!
//! Loaded once at startup from a JSON file and shared read-only with every
//! request. Only the CI access token is required; everything else has a
//! production default.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::service::poller::PollPolicy;

/// Orchestrator configuration
///
/// Keys in the config file are camelCase (e.g. `circleApiToken`).
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Static CI access token, sent on every CI request
    pub circle_api_token: String,

    /// API key for the Cloud Billing catalog (price publishing is disabled without it)
    pub google_cloud_billing_key: Option<String>,

    /// CI API root
    pub circle_base_url: String,

    /// Host prefix of project repository URLs (e.g., "https://github.com")
    pub vcs_host_url: String,

    /// VCS type segment of CI project paths
    pub vcs_type: String,

    /// Organization owning the deployed repositories
    pub vcs_org: String,

    /// Branch whose last successful build gets deployed
    pub tracked_branch: String,

    /// Workflow job name that produces deployable artifacts
    pub build_job_name: String,

    /// Job run by the triggered deploy build
    pub deploy_job_name: String,

    /// How many previous-successful links to follow when looking for a build
    pub build_search_attempts: u32,

    /// Delay between two status checks of a deploy build, in milliseconds
    pub poll_interval_ms: u64,

    /// Number of status checks before a deploy is reported as timed out
    pub poll_attempts: u32,

    /// Project id the service must be running in to accept deploy requests
    pub production_project_id: String,

    /// Location of the production config blob
    pub prod_config_bucket: String,
    pub prod_config_object: String,

    /// Destination of the published download prices
    pub pricing_bucket: String,
    pub pricing_object: String,

    /// Billing catalog service and SKU of the published price
    pub billing_service_id: String,
    pub download_sku_id: String,

    /// Header set by the cron scheduler, and its expected value
    pub cron_header: String,
    pub cron_header_value: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            circle_api_token: String::new(),
            google_cloud_billing_key: None,
            circle_base_url: launchpad_client::DEFAULT_CIRCLE_BASE_URL.to_string(),
            vcs_host_url: "https://github.com".to_string(),
            vcs_type: "github".to_string(),
            vcs_org: "DataBiosphere".to_string(),
            tracked_branch: "dev".to_string(),
            build_job_name: "build".to_string(),
            deploy_job_name: "deploy-prod".to_string(),
            build_search_attempts: 10,
            poll_interval_ms: 10_000,
            poll_attempts: 60,
            production_project_id: "bvdp-saturn-prod".to_string(),
            prod_config_bucket: "bvdp-saturn-prod-config".to_string(),
            prod_config_object: "config.json".to_string(),
            pricing_bucket: "bvdp-saturn-prod-cloud-pricing".to_string(),
            pricing_object: "na-download-prices.json".to_string(),
            billing_service_id: "95FF-2EF5-5EA1".to_string(),
            // "Download Worldwide Destinations (excluding Asia & Australia)"
            download_sku_id: "22EB-AAE8-FBCD".to_string(),
            cron_header: "x-appengine-cron".to_string(),
            cron_header_value: "true".to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        Self::from_json(&contents)
    }

    /// Parses configuration from a JSON document
    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        serde_json::from_str(contents).map_err(|e| anyhow::anyhow!("Invalid config file: {}", e))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.circle_api_token.is_empty() {
            anyhow::bail!("circleApiToken cannot be empty");
        }

        if !self.circle_base_url.starts_with("http://")
            && !self.circle_base_url.starts_with("https://")
        {
            anyhow::bail!("circleBaseUrl must start with http:// or https://");
        }

        if self.poll_interval_ms == 0 {
            anyhow::bail!("pollIntervalMs must be greater than 0");
        }

        if self.poll_attempts == 0 {
            anyhow::bail!("pollAttempts must be greater than 0");
        }

        Ok(())
    }

    /// Repository URL the CI service records for a project
    pub fn repo_url(&self, project: &str) -> String {
        format!(
            "{}/{}/{}",
            self.vcs_host_url.trim_end_matches('/'),
            self.vcs_org,
            project
        )
    }

    /// Polling budget for deploy builds
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.poll_attempts,
        }
    }

    /// CI token with everything past the first 6 characters masked, for logs
    pub fn obfuscated_token(&self) -> String {
        obfuscate(&self.circle_api_token, 6)
    }
}

fn obfuscate(secret: &str, visible: usize) -> String {
    secret
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { c } else { '*' })
        .collect()
}
