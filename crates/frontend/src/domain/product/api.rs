use contracts::domain::product::{Product, ProductDto};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<Product>, HttpError> {
    http::get_json("/api/products").await
}

/// Active products only: what the transaction editors offer for picking.
pub async fn fetch_active() -> Result<Vec<Product>, HttpError> {
    let all = fetch_all().await?;
    Ok(all.into_iter().filter(|p| p.active).collect())
}

pub async fn fetch_by_id(id: Uuid) -> Result<Product, HttpError> {
    http::get_json(&format!("/api/products/{}", id)).await
}

pub async fn create(dto: &ProductDto) -> Result<Product, HttpError> {
    http::post_json("/api/products", dto).await
}

pub async fn update(id: Uuid, dto: &ProductDto) -> Result<Product, HttpError> {
    http::put_json(&format!("/api/products/{}", id), dto).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/products/{}", id)).await
}

pub async fn toggle_active(id: Uuid) -> Result<Product, HttpError> {
    http::put_empty(&format!("/api/products/{}/toggle-active", id)).await
}
