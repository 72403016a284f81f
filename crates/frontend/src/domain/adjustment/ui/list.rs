use contracts::domain::adjustment::Adjustment;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::adjustment::api;
use crate::domain::adjustment::ui::editor::AdjustmentEditor;
use crate::domain::adjustment::ui::view::AdjustmentView;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::toast::use_toast;

const EDITOR_FRAME: &str = "max-width: min(1100px, 97vw); width: min(1100px, 97vw);";

#[component]
#[allow(non_snake_case)]
pub fn AdjustmentList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Adjustment>>(Vec::new());
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

    let open_editor = move || {
        modal_stack.push_with_frame(Some(EDITOR_FRAME.to_string()), move |handle| {
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
            view! { <AdjustmentEditor on_saved=on_saved on_cancel=on_cancel /> }.into_any()
        });
    };

    let open_view = move |id: Uuid| {
        modal_stack.push_with_frame(
            Some("max-width: min(800px, 95vw); width: min(800px, 95vw);".to_string()),
            move |handle| {
                let on_close = Rc::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! { <AdjustmentView id=id on_close=on_close /> }.into_any()
            },
        );
    };

    let delete = move |adjustment: Adjustment| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Xóa phiếu điều chỉnh \"{}\"?", adjustment.code))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove(adjustment.id).await {
                Ok(message) => {
                    toast.success(message.unwrap_or_else(|| "Đã xóa phiếu điều chỉnh".to_string()));
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
                    <h1 class="header__title">{"Điều chỉnh tồn kho"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_editor()>
                        {icon("plus")}
                        {"Tạo phiếu điều chỉnh"}
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
                            <th class="table__header-cell">{"Mã phiếu"}</th>
                            <th class="table__header-cell">{"Ngày điều chỉnh"}</th>
                            <th class="table__header-cell">{"Người lập phiếu"}</th>
                            <th class="table__header-cell">{"Số lô"}</th>
                            <th class="table__header-cell">{"Thao tác"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="5">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            items.get().into_iter().map(|adjustment| {
                                let id = adjustment.id;
                                let for_delete = adjustment.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell"><span class="tag tag--blue">{adjustment.code.clone()}</span></td>
                                        <td class="table__cell">{format_datetime(&adjustment.adjust_date)}</td>
                                        <td class="table__cell">{adjustment.created_by_name.clone().unwrap_or_else(|| adjustment.created_by.clone())}</td>
                                        <td class="table__cell">{adjustment.details.len()}</td>
                                        <td class="table__cell">
                                            <button class="button button--small" on:click=move |_| open_view(id)>
                                                {icon("eye")}
                                                {"Xem"}
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
