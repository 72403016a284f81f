use contracts::domain::user::ChangePasswordRequest;
use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use crate::system::auth::api;

#[component]
pub fn ChangePasswordModal(on_close: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let submit = {
        let on_close = on_close.clone();
        move || {
            let old = old_password.get();
            let new = new_password.get();
            let confirm = confirm_password.get();

            if new.len() < 6 {
                set_error.set(Some("Mật khẩu mới phải có ít nhất 6 ký tự".into()));
                return;
            }
            if new != confirm {
                set_error.set(Some("Xác nhận mật khẩu không khớp".into()));
                return;
            }

            set_error.set(None);
            set_saving.set(true);
            let on_close = on_close.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let request = ChangePasswordRequest {
                    old_password: old,
                    new_password: new,
                };
                match api::change_password(&request).await {
                    Ok(message) => {
                        toast.success(
                            message.unwrap_or_else(|| "Đổi mật khẩu thành công!".to_string()),
                        );
                        (on_close)(());
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_saving.set(false);
            });
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{"Đổi mật khẩu"}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="old-password">{"Mật khẩu hiện tại"}</label>
                    <input
                        type="password"
                        id="old-password"
                        prop:value=move || old_password.get()
                        on:input=move |ev| set_old_password.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="new-password">{"Mật khẩu mới"}</label>
                    <input
                        type="password"
                        id="new-password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                        placeholder="Ít nhất 6 ký tự"
                    />
                </div>

                <div class="form-group">
                    <label for="confirm-password">{"Xác nhận mật khẩu mới"}</label>
                    <input
                        type="password"
                        id="confirm-password"
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| submit()
                    disabled=move || saving.get()
                >
                    {icon("save")}
                    {"Đổi mật khẩu"}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_close)(())>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
