use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::{api, context::AuthState, context::use_auth, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(token) => {
                    storage::save_token(&token);
                    // flips the auth gate over to the main layout
                    set_auth_state.set(AuthState::from_token(token));
                    set_is_loading.set(false);
                }
                Err(_) => {
                    set_error_message.set(Some("Sai tài khoản hoặc mật khẩu!".to_string()));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>{"📦 Kho hàng"}</h1>
                <h2>{"Đăng nhập hệ thống"}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">{"Tên đăng nhập"}</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="Username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Mật khẩu"}</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Đang đăng nhập..." } else { "Đăng nhập" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
