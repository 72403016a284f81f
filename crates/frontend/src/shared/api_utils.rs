//! API URL helpers for frontend-backend communication.

/// Base URL for API requests.
///
/// Built from the current window location; the backend listens on port 8080.
/// Returns an empty string when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8080", protocol, hostname)
}

/// Full API URL from a path starting with `/api/` (or `/auth/`).
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
