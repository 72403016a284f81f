use contracts::domain::adjustment::{Adjustment, AdjustmentPayload};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<Adjustment>, HttpError> {
    http::get_json("/api/adjustments").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<Adjustment, HttpError> {
    http::get_json(&format!("/api/adjustments/{}", id)).await
}

pub async fn create(payload: &AdjustmentPayload) -> Result<Adjustment, HttpError> {
    http::post_json("/api/adjustments", payload).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/adjustments/{}", id)).await
}
