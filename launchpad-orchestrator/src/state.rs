//! Shared application state
//!
//! Everything in here is immutable after startup; clones are cheap `Arc` copies.

use launchpad_client::{
    AccessTokenSource, BillingClient, CircleClient, IamClient, StorageClient,
};
use std::sync::Arc;

use crate::config::Config;
use crate::repository::{BuildRepository, KeyRepository, ObjectRepository, PriceCatalog};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub builds: Arc<dyn BuildRepository>,
    pub objects: Arc<dyn ObjectRepository>,
    pub keys: Arc<dyn KeyRepository>,
    /// Absent when no billing API key is configured
    pub prices: Option<Arc<dyn PriceCatalog>>,
}

impl AppState {
    /// Wires the production HTTP clients from the configuration
    pub fn from_config(config: Config, tokens: Arc<dyn AccessTokenSource>) -> Self {
        let builds = CircleClient::new(&config.circle_base_url, &config.circle_api_token)
            .with_project_slug(&config.vcs_type, &config.vcs_org);
        let objects = StorageClient::new(Arc::clone(&tokens));
        let keys = IamClient::new(tokens);
        let prices = config
            .google_cloud_billing_key
            .as_ref()
            .map(|key| Arc::new(BillingClient::new(key)) as Arc<dyn PriceCatalog>);

        Self {
            config: Arc::new(config),
            builds: Arc::new(builds),
            objects: Arc::new(objects),
            keys: Arc::new(keys),
            prices,
        }
    }
}
