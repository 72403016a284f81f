use contracts::domain::partner::{Partner, PartnerDto, PartnerType};
use uuid::Uuid;

use crate::shared::http::{self, HttpError};

pub async fn fetch_all() -> Result<Vec<Partner>, HttpError> {
    http::get_json("/api/partners").await
}

/// One partner kind, filtered client-side; the backend keeps both kinds in
/// one collection.
pub async fn fetch_by_type(partner_type: PartnerType) -> Result<Vec<Partner>, HttpError> {
    let all = fetch_all().await?;
    Ok(all
        .into_iter()
        .filter(|p| p.partner_type == partner_type)
        .collect())
}

pub async fn fetch_by_id(id: Uuid) -> Result<Partner, HttpError> {
    http::get_json(&format!("/api/partners/{}", id)).await
}

pub async fn create(dto: &PartnerDto) -> Result<Partner, HttpError> {
    http::post_json("/api/partners", dto).await
}

pub async fn update(id: Uuid, dto: &PartnerDto) -> Result<Partner, HttpError> {
    http::put_json(&format!("/api/partners/{}", id), dto).await
}

pub async fn remove(id: Uuid) -> Result<Option<String>, HttpError> {
    http::delete(&format!("/api/partners/{}", id)).await
}
