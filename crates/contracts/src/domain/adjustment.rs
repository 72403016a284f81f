use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted stock-adjustment document echoed back by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub id: Uuid,
    pub code: String,
    pub adjust_date: NaiveDateTime,
    pub created_by: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub details: Vec<AdjustmentDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentDetail {
    #[serde(default)]
    pub batch_code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub system_quantity: Option<f64>,
    pub actual_quantity: f64,
}

/// Create payload assembled by the adjustment editor before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentPayload {
    pub code: String,
    pub adjust_date: NaiveDateTime,
    pub created_by: String,
    pub details: Vec<AdjustmentDetailPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentDetailPayload {
    pub inventory_batch_id: Uuid,
    pub actual_quantity: f64,
}
