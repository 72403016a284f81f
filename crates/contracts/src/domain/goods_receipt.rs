use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted goods-receipt document as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceipt {
    pub id: Uuid,
    pub receipt_code: String,
    pub receipt_date: NaiveDateTime,
    pub partner_id: Uuid,
    #[serde(default)]
    pub partner_name: Option<String>,
    pub created_by_id: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub details: Vec<GoodsReceiptDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptDetail {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub product_id: Uuid,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub location_id: Uuid,
    #[serde(default)]
    pub location_name: Option<String>,
    pub unit_conversion_id: Option<Uuid>,
    #[serde(default)]
    pub unit_name: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Create payload: one discriminated shape per document type instead of the
/// ad-hoc object literals the call sites used to assemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptPayload {
    pub receipt_code: String,
    pub receipt_date: NaiveDateTime,
    pub partner_id: Uuid,
    pub created_by_id: String,
    pub paid_amount: f64,
    pub total_amount: f64,
    pub details: Vec<GoodsReceiptDetailPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceiptDetailPayload {
    pub product_id: Uuid,
    pub location_id: Uuid,
    pub unit_conversion_id: Option<Uuid>,
    pub quantity: f64,
    pub unit_price: f64,
}
