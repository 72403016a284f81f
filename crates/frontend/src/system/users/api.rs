use contracts::domain::user::{User, UserDto};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<User>, HttpError> {
    http::get_json("/api/users").await
}

pub async fn fetch_by_id(id: Uuid) -> Result<User, HttpError> {
    http::get_json(&format!("/api/users/{}", id)).await
}

pub async fn create(dto: &UserDto) -> Result<User, HttpError> {
    http::post_json("/api/users", dto).await
}

pub async fn update(id: Uuid, dto: &UserDto) -> Result<User, HttpError> {
    http::put_json(&format!("/api/users/{}", id), dto).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/users/{}", id)).await
}

pub async fn toggle_active(id: Uuid) -> Result<User, HttpError> {
    http::put_empty(&format!("/api/users/{}/toggle-active", id)).await
}
