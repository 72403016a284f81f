use contracts::domain::goods_receipt::{GoodsReceipt, GoodsReceiptPayload};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<GoodsReceipt>, HttpError> {
    http::get_json("/api/goods-receipts").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<GoodsReceipt, HttpError> {
    http::get_json(&format!("/api/goods-receipts/{}", id)).await
}

/// Created atomically server-side; a rejection leaves nothing persisted.
pub async fn create(payload: &GoodsReceiptPayload) -> Result<GoodsReceipt, HttpError> {
    http::post_json("/api/goods-receipts", payload).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/goods-receipts/{}", id)).await
}

pub async fn export_excel() -> Result<Vec<u8>, HttpError> {
    http::get_bytes("/api/goods-receipts/export/excel").await
}

pub async fn export_pdf(id: Uuid) -> Result<Vec<u8>, HttpError> {
    http::get_bytes(&format!("/api/goods-receipts/{}/export/pdf", id)).await
}
