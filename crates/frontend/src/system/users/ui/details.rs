use contracts::domain::user::{Role, UserDto};
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::shared::icons::icon;
use crate::system::users::api;

fn empty_dto() -> UserDto {
    UserDto {
        id: None,
        username: String::new(),
        full_name: None,
        email: None,
        role: Role::Staff,
        password: None,
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn UserDetails(
    id: Option<Uuid>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(empty_dto());
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_id(existing_id).await {
                Ok(user) => form.set(UserDto {
                    id: Some(user.id),
                    username: user.username,
                    full_name: user.full_name,
                    email: user.email,
                    role: user.role,
                    password: None,
                }),
                Err(e) => error.set(Some(format!("Lỗi tải người dùng: {}", e))),
            }
        });
    }

    let save = {
        let on_saved = on_saved.clone();
        move || {
            let dto = form.get();
            if let Err(message) = dto.validate() {
                error.set(Some(message));
                return;
            }
            let on_saved = on_saved.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match dto.id {
                    Some(existing) => api::update(existing, &dto).await,
                    None => api::create(&dto).await,
                };
                saving.set(false);
                match result {
                    Ok(_) => (on_saved)(()),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{move || if form.get().id.is_some() { "Chỉnh sửa người dùng" } else { "Thêm người dùng" }}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="user-username">{"Tên đăng nhập"}</label>
                    <input
                        type="text"
                        id="user-username"
                        prop:value=move || form.get().username
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        disabled=move || form.get().id.is_some()
                    />
                </div>

                <Show when=move || form.get().id.is_none()>
                    <div class="form-group">
                        <label for="user-password">{"Mật khẩu"}</label>
                        <input
                            type="password"
                            id="user-password"
                            prop:value=move || form.get().password.clone().unwrap_or_default()
                            on:input=move |ev| form.update(|f| f.password = optional(event_target_value(&ev)))
                            placeholder="Ít nhất 6 ký tự"
                        />
                    </div>
                </Show>

                <div class="form-group">
                    <label for="user-full-name">{"Họ tên"}</label>
                    <input
                        type="text"
                        id="user-full-name"
                        prop:value=move || form.get().full_name.clone().unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.full_name = optional(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="user-email">{"Email"}</label>
                    <input
                        type="email"
                        id="user-email"
                        prop:value=move || form.get().email.clone().unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.email = optional(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="user-role">{"Vai trò"}</label>
                    <select
                        id="user-role"
                        prop:value=move || match form.get().role {
                            Role::Admin => "ADMIN",
                            Role::Staff => "STAFF",
                        }
                        on:change=move |ev| {
                            let role = match event_target_value(&ev).as_str() {
                                "ADMIN" => Role::Admin,
                                _ => Role::Staff,
                            };
                            form.update(|f| f.role = role);
                        }
                    >
                        <option value="STAFF">{Role::Staff.label()}</option>
                        <option value="ADMIN">{Role::Admin.label()}</option>
                    </select>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| save()
                    disabled=move || saving.get() || form.get().username.trim().is_empty()
                >
                    {icon("save")}
                    {move || if form.get().id.is_some() { "Cập nhật" } else { "Thêm mới" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
