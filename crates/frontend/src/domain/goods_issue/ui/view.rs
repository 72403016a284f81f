use contracts::domain::goods_issue::GoodsIssue;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::goods_issue::api;
use crate::shared::date_utils::format_datetime;
use crate::shared::export::download_bytes;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_quantity, format_vnd};
use crate::shared::toast::use_toast;

#[component]
pub fn GoodsIssueView(id: Uuid, on_close: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let (issue, set_issue) = signal(Option::<GoodsIssue>::None);

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_by_id(id).await {
            Ok(doc) => set_issue.set(Some(doc)),
            Err(e) => toast.error(e.to_string()),
        }
    });

    let export_pdf = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::export_pdf(id).await {
                Ok(bytes) => {
                    if let Err(e) =
                        download_bytes(&bytes, "application/pdf", &format!("phieu-xuat-{}.pdf", id))
                    {
                        toast.error(e);
                    }
                }
                Err(e) => toast.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{"Chi tiết phiếu xuất kho"}</h3>
            </div>

            {move || issue.get().map(|doc| view! {
                <div class="document-view">
                    <div class="document-view__header">
                        <p><b>{"Mã phiếu: "}</b><span class="tag tag--blue">{doc.issue_code.clone()}</span></p>
                        <p><b>{"Loại phiếu: "}</b>{doc.issue_type.label()}</p>
                        <p><b>{"Ngày xuất: "}</b>{format_datetime(&doc.issue_date)}</p>
                        <p><b>{"Khách hàng: "}</b>{doc.customer_name.clone().unwrap_or_else(|| "-".into())}</p>
                        <p><b>{"Người lập phiếu: "}</b>{doc.created_by_name.clone().unwrap_or_else(|| doc.created_by_id.clone())}</p>
                        <p><b>{"Tổng tiền: "}</b><strong>{format_vnd(doc.total_amount)}</strong></p>
                    </div>
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Sản phẩm"}</th>
                                <th class="table__header-cell">{"Mã lô"}</th>
                                <th class="table__header-cell">{"Đơn vị"}</th>
                                <th class="table__header-cell">{"Số lượng"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {doc.details.iter().map(|detail| view! {
                                <tr class="table__row">
                                    <td class="table__cell">{detail.product_name.clone().unwrap_or_else(|| "-".into())}</td>
                                    <td class="table__cell">{detail.batch_code.clone().unwrap_or_else(|| "-".into())}</td>
                                    <td class="table__cell">{detail.unit_name.clone().unwrap_or_else(|| "-".into())}</td>
                                    <td class="table__cell">{format_quantity(detail.quantity)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            })}

            <div class="details-actions">
                <button class="btn btn-secondary" on:click=move |_| export_pdf()>
                    {icon("file-text")}
                    {"Xuất PDF"}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_close)(())>
                    {icon("cancel")}
                    {"Đóng"}
                </button>
            </div>
        </div>
    }
}
