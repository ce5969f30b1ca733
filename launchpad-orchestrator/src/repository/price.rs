//! Price Catalog

use async_trait::async_trait;
use launchpad_client::{BillingClient, Result};
use launchpad_core::dto::billing::SkuList;

/// Read access to the billing SKU catalog
#[async_trait]
pub trait PriceCatalog: Send + Sync {
    async fn list_skus(&self, service_id: &str) -> Result<SkuList>;
}

#[async_trait]
impl PriceCatalog for BillingClient {
    async fn list_skus(&self, service_id: &str) -> Result<SkuList> {
        BillingClient::list_skus(self, service_id).await
    }
}
