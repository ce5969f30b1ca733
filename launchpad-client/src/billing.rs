//! Cloud Billing catalog endpoints

use launchpad_core::dto::billing::SkuList;
use reqwest::Client;
use std::fmt;

use crate::error::Result;
use crate::handle_response;

const DEFAULT_BILLING_BASE_URL: &str = "https://cloudbilling.googleapis.com";

/// Client for the public pricing catalog, authenticated by API key
#[derive(Clone)]
pub struct BillingClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl fmt::Debug for BillingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl BillingClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BILLING_BASE_URL.to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// List the SKUs of a billing service, with pricing info
    pub async fn list_skus(&self, service_id: &str) -> Result<SkuList> {
        let url = format!("{}/v1/services/{}/skus", self.base_url, service_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "skus(pricingInfo,skuId)"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        handle_response(response).await
    }
}
