//! Cloud Billing catalog DTOs

use serde::{Deserialize, Serialize};

/// Response of the SKU listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkuList {
    #[serde(default)]
    pub skus: Vec<Sku>,
}

/// A billable SKU
///
/// Pricing info is kept as raw JSON since it is republished verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub sku_id: String,
    #[serde(default)]
    pub pricing_info: Vec<serde_json::Value>,
}

impl SkuList {
    /// Finds a SKU by identifier
    pub fn find(&self, sku_id: &str) -> Option<&Sku> {
        self.skus.iter().find(|s| s.sku_id == sku_id)
    }
}
