//! Download Price Publisher
//!
//! Copies one SKU's pricing info from the billing catalog to a public object,
//! where the UI reads it to estimate egress costs.

use tracing::info;

use crate::service::error::PricingError;
use crate::state::AppState;

/// Fetch the configured download SKU and publish its first pricing entry
pub async fn update_download_prices(state: &AppState) -> Result<(), PricingError> {
    let config = &state.config;
    let catalog = state.prices.as_ref().ok_or(PricingError::MissingBillingKey)?;

    let skus = catalog.list_skus(&config.billing_service_id).await?;
    let sku = skus
        .find(&config.download_sku_id)
        .ok_or_else(|| PricingError::SkuNotFound(config.download_sku_id.clone()))?;
    let price = sku
        .pricing_info
        .first()
        .ok_or_else(|| PricingError::NoPricingInfo(sku.sku_id.clone()))?;

    state
        .objects
        .upload_public_json(&config.pricing_bucket, &config.pricing_object, price.to_string())
        .await?;

    info!(
        "Published download prices to gs://{}/{}",
        config.pricing_bucket, config.pricing_object
    );

    Ok(())
}
