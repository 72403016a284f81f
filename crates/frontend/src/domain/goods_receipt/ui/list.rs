use contracts::domain::goods_receipt::GoodsReceipt;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::goods_receipt::api;
use crate::domain::goods_receipt::ui::editor::GoodsReceiptEditor;
use crate::domain::goods_receipt::ui::view::GoodsReceiptView;
use crate::shared::date_utils::format_datetime;
use crate::shared::export::download_bytes;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::number_format::format_vnd;
use crate::shared::toast::use_toast;

const EDITOR_FRAME: &str = "max-width: min(1400px, 97vw); width: min(1400px, 97vw);";
const EXCEL_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[component]
#[allow(non_snake_case)]
pub fn GoodsReceiptList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<GoodsReceipt>>(Vec::new());
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
            // closing discards the in-memory ledger unconditionally
            let on_cancel = Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! { <GoodsReceiptEditor on_saved=on_saved on_cancel=on_cancel /> }.into_any()
        });
    };

    let open_view = move |id: Uuid| {
        modal_stack.push_with_frame(
            Some("max-width: min(900px, 95vw); width: min(900px, 95vw);".to_string()),
            move |handle| {
                let on_close = Rc::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! { <GoodsReceiptView id=id on_close=on_close /> }.into_any()
            },
        );
    };

    let delete = move |receipt: GoodsReceipt| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Xóa phiếu nhập \"{}\"?", receipt.receipt_code))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove(receipt.id).await {
                Ok(message) => {
                    toast.success(message.unwrap_or_else(|| "Đã xóa phiếu nhập".to_string()));
                    fetch();
                }
                Err(e) => toast.error(e.to_string()),
            }
        });
    };

    let export_excel = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::export_excel().await {
                Ok(bytes) => {
                    if let Err(e) = download_bytes(&bytes, EXCEL_MIME, "phieu-nhap-kho.xlsx") {
                        toast.error(e);
                    }
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
                    <h1 class="header__title">{"Phiếu nhập kho"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_editor()>
                        {icon("plus")}
                        {"Tạo phiếu nhập"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| export_excel()>
                        {icon("file-text")}
                        {"Xuất Excel"}
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
                            <th class="table__header-cell">{"Ngày nhập"}</th>
                            <th class="table__header-cell">{"Nhà cung cấp"}</th>
                            <th class="table__header-cell">{"Tổng tiền"}</th>
                            <th class="table__header-cell">{"Người lập phiếu"}</th>
                            <th class="table__header-cell">{"Thao tác"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="6">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            items.get().into_iter().map(|receipt| {
                                let id = receipt.id;
                                let for_delete = receipt.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell"><span class="tag tag--blue">{receipt.receipt_code.clone()}</span></td>
                                        <td class="table__cell">{format_datetime(&receipt.receipt_date)}</td>
                                        <td class="table__cell">{receipt.partner_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{format_vnd(receipt.total_amount)}</td>
                                        <td class="table__cell">{receipt.created_by_name.clone().unwrap_or_else(|| receipt.created_by_id.clone())}</td>
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
