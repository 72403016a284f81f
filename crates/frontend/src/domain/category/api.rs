use contracts::domain::category::{Category, CategoryDto};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<Category>, HttpError> {
    http::get_json("/api/categories").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<Category, HttpError> {
    http::get_json(&format!("/api/categories/{}", id)).await
}

pub async fn create(dto: &CategoryDto) -> Result<Category, HttpError> {
    http::post_json("/api/categories", dto).await
}

pub async fn update(id: Uuid, dto: &CategoryDto) -> Result<Category, HttpError> {
    http::put_json(&format!("/api/categories/{}", id), dto).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/categories/{}", id)).await
}

pub async fn toggle_active(id: Uuid) -> Result<Category, HttpError> {
    http::put_empty(&format!("/api/categories/{}/toggle-active", id)).await
}
