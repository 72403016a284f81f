use contracts::domain::category::CategoryDto;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::category::api;
use crate::shared::icons::icon;

#[component]
pub fn CategoryDetails(
    id: Option<Uuid>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(CategoryDto::default());
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    if let Some(existing_id) = id {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_id(existing_id).await {
                Ok(category) => form.set(CategoryDto {
                    id: Some(category.id),
                    name: category.name,
                    description: category.description,
                }),
                Err(e) => error.set(Some(format!("Lỗi tải danh mục: {}", e))),
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
                <h3>{move || if form.get().id.is_some() { "Chỉnh sửa danh mục" } else { "Thêm danh mục mới" }}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="category-name">{"Tên danh mục"}</label>
                    <input
                        type="text"
                        id="category-name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Nhập tên danh mục..."
                    />
                </div>

                <div class="form-group">
                    <label for="category-description">{"Mô tả"}</label>
                    <textarea
                        id="category-description"
                        prop:value=move || form.get().description.clone().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.description = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                        placeholder="Mô tả ngắn (không bắt buộc)"
                        rows="3"
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
