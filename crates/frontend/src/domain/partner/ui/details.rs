use contracts::domain::partner::{PartnerDto, PartnerType};
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::partner::api;
use crate::shared::icons::icon;

fn empty_dto(partner_type: PartnerType) -> PartnerDto {
    PartnerDto {
        id: None,
        name: String::new(),
        email: None,
        phone: None,
        address: None,
        partner_type,
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
pub fn PartnerDetails(
    id: Option<Uuid>,
    partner_type: PartnerType,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(empty_dto(partner_type));
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_id(existing_id).await {
                Ok(partner) => form.set(PartnerDto {
                    id: Some(partner.id),
                    name: partner.name,
                    email: partner.email,
                    phone: partner.phone,
                    address: partner.address,
                    partner_type: partner.partner_type,
                }),
                Err(e) => error.set(Some(format!("Lỗi tải đối tác: {}", e))),
            }
        });
    }

    let type_label = partner_type.label();

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
                <h3>
                    {move || {
                        if form.get().id.is_some() {
                            format!("Chỉnh sửa {}", type_label.to_lowercase())
                        } else {
                            format!("Thêm {}", type_label.to_lowercase())
                        }
                    }}
                </h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="partner-name">{"Tên"}</label>
                    <input
                        type="text"
                        id="partner-name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder=format!("Nhập tên {}...", type_label.to_lowercase())
                    />
                </div>

                <div class="form-group">
                    <label for="partner-email">{"Email"}</label>
                    <input
                        type="email"
                        id="partner-email"
                        prop:value=move || form.get().email.clone().unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.email = optional(event_target_value(&ev)))
                        placeholder="email@example.com"
                    />
                </div>

                <div class="form-group">
                    <label for="partner-phone">{"Số điện thoại"}</label>
                    <input
                        type="tel"
                        id="partner-phone"
                        prop:value=move || form.get().phone.clone().unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.phone = optional(event_target_value(&ev)))
                        placeholder="VD: 0901 234 567"
                    />
                </div>

                <div class="form-group">
                    <label for="partner-address">{"Địa chỉ"}</label>
                    <textarea
                        id="partner-address"
                        prop:value=move || form.get().address.clone().unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.address = optional(event_target_value(&ev)))
                        rows="2"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| save()
                    disabled=move || saving.get() || form.get().name.trim().is_empty()
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
