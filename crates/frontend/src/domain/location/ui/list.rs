use contracts::domain::location::Location;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::location::api;
use crate::domain::location::ui::details::LocationDetails;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::toast::use_toast;

#[component]
#[allow(non_snake_case)]
pub fn LocationList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Location>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let toast = use_toast();
    let modal_stack = use_modal_stack();

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_all().await {
                Ok(list) => set_items.set(list),
                Err(e) => toast.error(e.to_string()),
            }
            set_loading.set(false);
        });
    };

    let open_details = move |id: Option<Uuid>| {
        modal_stack.push(move |handle| {
            let on_saved = Rc::new({
                let handle = handle.clone();
                move |_| {
                    handle.close();
                    fetch();
                }
            });
            let on_cancel = Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! { <LocationDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
        });
    };

    let delete = move |location: Location| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Xóa vị trí \"{}\"?", location.name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove(location.id).await {
                Ok(message) => {
                    toast.success(message.unwrap_or_else(|| "Đã xóa vị trí kho".to_string()));
                    fetch();
                }
                Err(e) => toast.error(e.to_string()),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Vị trí kho"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Thêm vị trí"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Tải lại"}
                    </button>
                </div>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Tên vị trí"}</th>
                            <th class="table__header-cell">{"Mô tả"}</th>
                            <th class="table__header-cell">{"Trạng thái"}</th>
                            <th class="table__header-cell">{"Thao tác"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="4">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            items.get().into_iter().map(|location| {
                                let id = location.id;
                                let for_delete = location.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{location.name.clone()}</td>
                                        <td class="table__cell">{location.description.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">
                                            <span class=if location.active { "tag tag--green" } else { "tag tag--red" }>
                                                {if location.active { "Đang dùng" } else { "Ngừng dùng" }}
                                            </span>
                                        </td>
                                        <td class="table__cell">
                                            <button class="button button--small" on:click=move |_| open_details(Some(id))>
                                                {icon("edit")}
                                                {"Sửa"}
                                            </button>
                                            <button class="button button--small button--danger" on:click=move |_| delete(for_delete.clone())>
                                                {icon("delete")}
                                                {"Xóa"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
