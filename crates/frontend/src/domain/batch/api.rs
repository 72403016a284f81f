use contracts::domain::batch::InventoryBatch;
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<InventoryBatch>, HttpError> {
    http::get_json("/api/inventory-batches").await
}

/// Open batches of one product, for the issue batch picker.
pub async fn fetch_by_product(product_id: Uuid) -> Result<Vec<InventoryBatch>, HttpError> {
    http::get_json(&format!("/api/inventory-batches/by-product/{}", product_id)).await
}

/// Lookup by scanned batch code. 404 comes back as an `HttpError::Status`.
pub async fn fetch_by_code(code: &str) -> Result<InventoryBatch, HttpError> {
    http::get_json(&format!("/api/inventory-batches/by-code/{}", code)).await
}
