use contracts::domain::goods_issue::{CancelIssueRequest, GoodsIssue, GoodsIssuePayload};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<GoodsIssue>, HttpError> {
    http::get_json("/api/goods-issues").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<GoodsIssue, HttpError> {
    http::get_json(&format!("/api/goods-issues/{}", id)).await
}

pub async fn create(payload: &GoodsIssuePayload) -> Result<GoodsIssue, HttpError> {
    http::post_json("/api/goods-issues", payload).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/goods-issues/{}", id)).await
}

/// Cancellation restores the issued stock; it is its own endpoint, not a
/// delete.
pub async fn cancel(request: &CancelIssueRequest) -> Result<GoodsIssue, HttpError> {
    http::post_json("/api/goods-issues/cancel", request).await
}

pub async fn export_excel() -> Result<Vec<u8>, HttpError> {
    http::get_bytes("/api/goods-issues/export/excel").await
}

pub async fn export_pdf(id: Uuid) -> Result<Vec<u8>, HttpError> {
    http::get_bytes(&format!("/api/goods-issues/{}/export/pdf", id)).await
}
