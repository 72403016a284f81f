use contracts::system::auth::{decode_claims, Claims};
use leptos::prelude::*;

use super::storage;
use crate::shared::runtime;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub claims: Option<Claims>,
}

impl AuthState {
    pub fn from_token(token: String) -> Self {
        let claims = decode_claims(&token).ok();
        Self {
            token: Some(token),
            claims,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().map(Claims::is_admin).unwrap_or(false)
    }

    /// Identity placed into `createdBy` fields of submitted documents.
    pub fn user_id(&self) -> Option<String> {
        self.claims
            .as_ref()
            .and_then(|c| c.user_id())
            .map(str::to_string)
    }

    pub fn display_name(&self) -> String {
        self.claims
            .as_ref()
            .and_then(|c| c.display_name())
            .unwrap_or("?")
            .to_string()
    }
}

/// Auth context provider. Restores the session from localStorage on mount;
/// an expired or undecodable token is discarded immediately.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let initial = match storage::get_token() {
        Some(token) => match decode_claims(&token) {
            Ok(claims) if !claims.is_expired((runtime::now_ms() / 1000.0) as i64) => AuthState {
                token: Some(token),
                claims: Some(claims),
            },
            _ => {
                storage::clear_token();
                AuthState::default()
            }
        },
        None => AuthState::default(),
    };

    let (auth_state, set_auth_state) = signal(initial);
    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state.
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");
    (auth_state, set_auth_state)
}

/// Clear the credential and drop back to the login view.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_token();
    set_auth_state.set(AuthState::default());
}
