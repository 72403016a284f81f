use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

/// Read-only view of the identity decoded from the JWT payload. Display
/// only; nothing here is a security boundary.
#[component]
pub fn ProfileModal(on_close: Rc<dyn Fn(())>) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{"Thông tin cá nhân"}</h3>
            </div>

            <div class="document-view">
                <p><b>{"Tên đăng nhập: "}</b>{move || auth_state.get().display_name()}</p>
                <p><b>{"Mã người dùng: "}</b>{move || auth_state.get().user_id().unwrap_or_else(|| "-".into())}</p>
                <p>
                    <b>{"Vai trò: "}</b>
                    {move || {
                        let roles = auth_state
                            .get()
                            .claims
                            .map(|c| c.role_names().join(", "))
                            .unwrap_or_default();
                        if roles.is_empty() { "-".to_string() } else { roles }
                    }}
                </p>
            </div>

            <div class="details-actions">
                <button class="btn btn-secondary" on:click=move |_| (on_close)(())>
                    {icon("cancel")}
                    {"Đóng"}
                </button>
            </div>
        </div>
    }
}
