use contracts::domain::location::{Location, LocationDto};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<Location>, HttpError> {
    http::get_json("/api/locations").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<Location, HttpError> {
    http::get_json(&format!("/api/locations/{}", id)).await
}

pub async fn create(dto: &LocationDto) -> Result<Location, HttpError> {
    http::post_json("/api/locations", dto).await
}

pub async fn update(id: Uuid, dto: &LocationDto) -> Result<Location, HttpError> {
    http::put_json(&format!("/api/locations/{}", id), dto).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/locations/{}", id)).await
}
