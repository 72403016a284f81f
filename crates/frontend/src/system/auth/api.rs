use contracts::domain::user::ChangePasswordRequest;
use contracts::system::auth::LoginRequest;

use crate::shared::http::{self, HttpError};

/// Login with username and password; the backend returns the JWT as the
/// envelope's `result`.
pub async fn login(username: String, password: String) -> Result<String, HttpError> {
    http::post_json("/auth/login", &LoginRequest { username, password }).await
}

pub async fn change_password(request: &ChangePasswordRequest) -> Result<Option<String>, HttpError> {
    http::post_for_message("/api/users/change-password", request).await
}
