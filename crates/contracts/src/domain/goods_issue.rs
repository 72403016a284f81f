use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sale issues ship stock to a customer; cancel issues return previously
/// issued stock and carry no counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Sale,
    Cancel,
}

impl IssueType {
    pub fn requires_customer(&self) -> bool {
        matches!(self, IssueType::Sale)
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Sale => "Bán hàng",
            IssueType::Cancel => "Hủy hàng",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsIssue {
    pub id: Uuid,
    pub issue_code: String,
    pub issue_date: NaiveDateTime,
    pub issue_type: IssueType,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub created_by_id: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub details: Vec<GoodsIssueDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsIssueDetail {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub product_id: Uuid,
    #[serde(default)]
    pub product_name: Option<String>,
    pub inventory_batch_id: Uuid,
    #[serde(default)]
    pub batch_code: Option<String>,
    pub unit_conversion_id: Option<Uuid>,
    #[serde(default)]
    pub unit_name: Option<String>,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsIssuePayload {
    pub issue_code: String,
    pub issue_date: NaiveDateTime,
    pub issue_type: IssueType,
    /// Required for sale issues, absent for cancel issues.
    pub customer_id: Option<Uuid>,
    pub created_by_id: String,
    pub amount_paid: f64,
    pub details: Vec<GoodsIssueDetailPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsIssueDetailPayload {
    pub product_id: Uuid,
    pub inventory_batch_id: Uuid,
    pub unit_conversion_id: Option<Uuid>,
    pub quantity: f64,
}

/// Cancellation of an already-persisted issue goes through its own endpoint,
/// distinct from generic delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelIssueRequest {
    pub issue_id: Uuid,
    pub reason: Option<String>,
    pub created_by_id: String,
}
