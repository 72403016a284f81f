//! Shared HTTP client: attaches the Bearer token, unwraps the backend's
//! `{message, result}` envelope and maps failures to user-facing messages.
//!
//! A 401 additionally clears the stored credential and sends the browser
//! back to the login entry point after a short delay.

use contracts::api::ApiResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    Network(String),
    Parse(String),
    Status { code: u16, message: String },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Network(_) => {
                write!(f, "Không thể kết nối đến server. Vui lòng thử lại sau!")
            }
            HttpError::Parse(e) => write!(f, "Dữ liệu phản hồi không hợp lệ: {}", e),
            HttpError::Status { message, .. } => write!(f, "{}", message),
        }
    }
}

fn authorize(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Generic status-keyed messages, used when the body has no `message`.
fn default_message(status: u16) -> String {
    match status {
        401 => "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại!".into(),
        403 => "Bạn không có quyền truy cập tính năng này!".into(),
        404 => "Không tìm thấy tài nguyên!".into(),
        s if s >= 500 => "Lỗi server. Vui lòng thử lại sau!".into(),
        s => format!("Yêu cầu thất bại (HTTP {})", s),
    }
}

fn handle_unauthorized() {
    storage::clear_token();
    spawn_local(async {
        TimeoutFuture::new(1_500).await;
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    });
}

async fn read_error(status: u16, response: &Response) -> HttpError {
    let body_message = match response.text().await {
        Ok(text) => serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            .ok()
            .and_then(|e| e.message),
        Err(_) => None,
    };
    if status == 401 {
        handle_unauthorized();
    }
    HttpError::Status {
        code: status,
        message: body_message.unwrap_or_else(|| default_message(status)),
    }
}

/// Unwrap a successful response's envelope into its `result`.
async fn unwrap_result<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(read_error(status, &response).await);
    }
    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| HttpError::Parse(e.to_string()))?;
    envelope.into_result().map_err(|message| HttpError::Status {
        code: status,
        message,
    })
}

/// Unwrap a successful response's envelope into its server message (for
/// acknowledgement-only endpoints like delete).
async fn unwrap_message(response: Response) -> Result<Option<String>, HttpError> {
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(read_error(status, &response).await);
    }
    let envelope: ApiResponse<serde_json::Value> = response
        .json()
        .await
        .map_err(|e| HttpError::Parse(e.to_string()))?;
    Ok(envelope.message)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, HttpError> {
    let response = authorize(Request::get(&api_url(path)))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_result(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, HttpError> {
    let response = authorize(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| HttpError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_result(response).await
}

/// POST where only the acknowledgement message matters.
pub async fn post_for_message<B: Serialize>(
    path: &str,
    body: &B,
) -> Result<Option<String>, HttpError> {
    let response = authorize(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| HttpError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_message(response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, HttpError> {
    let response = authorize(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| HttpError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_result(response).await
}

/// PUT with no body, e.g. toggle-active endpoints.
pub async fn put_empty<T: DeserializeOwned>(path: &str) -> Result<T, HttpError> {
    let response = authorize(Request::put(&api_url(path)))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_result(response).await
}

pub async fn delete(path: &str) -> Result<Option<String>, HttpError> {
    let response = authorize(Request::delete(&api_url(path)))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    unwrap_message(response).await
}

/// Binary download (Excel/PDF exports produced by the backend).
pub async fn get_bytes(path: &str) -> Result<Vec<u8>, HttpError> {
    let response = authorize(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(read_error(status, &response).await);
    }
    response
        .binary()
        .await
        .map_err(|e| HttpError::Parse(e.to_string()))
}
