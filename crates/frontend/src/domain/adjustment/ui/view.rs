use contracts::domain::adjustment::Adjustment;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::adjustment::api;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::number_format::format_quantity;
use crate::shared::toast::use_toast;

#[component]
pub fn AdjustmentView(id: Uuid, on_close: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let (adjustment, set_adjustment) = signal(Option::<Adjustment>::None);

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_by_id(id).await {
            Ok(doc) => set_adjustment.set(Some(doc)),
            Err(e) => toast.error(e.to_string()),
        }
    });

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{"Chi tiết phiếu điều chỉnh tồn kho"}</h3>
            </div>

            {move || adjustment.get().map(|doc| view! {
                <div class="document-view">
                    <div class="document-view__header">
                        <p><b>{"Mã phiếu: "}</b><span class="tag tag--blue">{doc.code.clone()}</span></p>
                        <p><b>{"Ngày điều chỉnh: "}</b>{format_datetime(&doc.adjust_date)}</p>
                        <p><b>{"Người lập phiếu: "}</b>{doc.created_by_name.clone().unwrap_or_else(|| doc.created_by.clone())}</p>
                    </div>
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Mã lô"}</th>
                                <th class="table__header-cell">{"Sản phẩm"}</th>
                                <th class="table__header-cell">{"Tồn hệ thống"}</th>
                                <th class="table__header-cell">{"Thực tế"}</th>
                                <th class="table__header-cell">{"Chênh lệch"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {doc.details.iter().map(|detail| {
                                let system = detail.system_quantity.unwrap_or(0.0);
                                let delta = detail.actual_quantity - system;
                                let delta_class = if delta < 0.0 {
                                    "table__cell table__cell--negative"
                                } else {
                                    "table__cell table__cell--positive"
                                };
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{detail.batch_code.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{detail.product_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{format_quantity(system)}</td>
                                        <td class="table__cell">{format_quantity(detail.actual_quantity)}</td>
                                        <td class=delta_class>{format_quantity(delta)}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            })}

            <div class="details-actions">
                <button class="btn btn-secondary" on:click=move |_| (on_close)(())>
                    {icon("cancel")}
                    {"Đóng"}
                </button>
            </div>
        </div>
    }
}
