//! Client-side JWT payload decoding.
//!
//! The token is decoded, never verified. Signature checks belong to the
//! backend. Decoded claims drive display and menu hinting only and must not
//! be treated as a security boundary.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("token không đúng định dạng JWT")]
    Malformed,
    #[error("không giải mã được payload: {0}")]
    Decode(String),
    #[error("payload không phải JSON hợp lệ: {0}")]
    Parse(String),
}

/// The subset of JWT claims the console reads. `roles` is kept as raw JSON
/// because backends emit it either as a string or as an array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub roles: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Identity for `createdBy` fields: `userId` claim with `sub` fallback.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.sub.as_deref())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.sub.as_deref())
    }

    /// Role claims flattened to strings, whatever shape the backend used.
    pub fn role_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        match &self.roles {
            Some(serde_json::Value::String(s)) => {
                names.extend(s.split_whitespace().map(str::to_string))
            }
            Some(serde_json::Value::Array(items)) => names.extend(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string),
            ),
            _ => {}
        }
        if let Some(role) = &self.role {
            names.push(role.clone());
        }
        names
    }

    pub fn is_admin(&self) -> bool {
        self.role_names()
            .iter()
            .any(|r| r == "ADMIN" || r == "ROLE_ADMIN")
    }

    pub fn is_expired(&self, now_epoch_secs: i64) -> bool {
        matches!(self.exp, Some(exp) if exp <= now_epoch_secs)
    }
}

/// Decode the payload segment of a JWT without verifying the signature.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let mut segments = token.split('.');
    let (_header, payload) = match (segments.next(), segments.next()) {
        (Some(h), Some(p)) if !p.is_empty() => (h, p),
        _ => return Err(AuthError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            "c2ln"
        )
    }

    #[test]
    fn decodes_array_roles_and_user_id() {
        let claims = decode_claims(&token_for(
            r#"{"sub":"nvkho","userId":"42","roles":["ADMIN","STAFF"],"exp":1900000000}"#,
        ))
        .unwrap();
        assert_eq!(claims.user_id(), Some("42"));
        assert!(claims.is_admin());
        assert!(!claims.is_expired(1_800_000_000));
        assert!(claims.is_expired(1_900_000_001));
    }

    #[test]
    fn decodes_scope_string_roles() {
        let claims =
            decode_claims(&token_for(r#"{"sub":"staff01","roles":"ROLE_ADMIN STAFF"}"#)).unwrap();
        assert_eq!(claims.user_id(), Some("staff01"));
        assert!(claims.is_admin());
    }

    #[test]
    fn single_role_claim_is_honored() {
        let claims = decode_claims(&token_for(r#"{"sub":"staff01","role":"STAFF"}"#)).unwrap();
        assert_eq!(claims.role_names(), vec!["STAFF".to_string()]);
        assert!(!claims.is_admin());
    }

    #[test]
    fn malformed_tokens_are_typed_errors() {
        assert_eq!(decode_claims("not-a-jwt"), Err(AuthError::Malformed));
        assert!(matches!(
            decode_claims("a.###.b"),
            Err(AuthError::Decode(_))
        ));
    }
}
