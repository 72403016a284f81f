use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::batch::InventoryBatch;
use leptos::prelude::*;
use uuid::Uuid;

use crate::domain::batch::api;
use crate::domain::product::api as product_api;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_quantity, format_vnd};
use crate::shared::toast::use_toast;

#[derive(Clone)]
struct BatchRow {
    batch: InventoryBatch,
    slow_moving: bool,
}

impl CsvExportable for BatchRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Mã lô",
            "Sản phẩm",
            "Vị trí kho",
            "SL ban đầu",
            "SL còn",
            "Giá nhập",
            "Chậm luân chuyển",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.batch.batch_code.clone(),
            self.batch.product_name.clone().unwrap_or_default(),
            self.batch.location_name.clone().unwrap_or_default(),
            format_quantity(self.batch.initial_quantity),
            format_quantity(self.batch.remaining_quantity),
            format_vnd(self.batch.unit_cost),
            if self.slow_moving { "Có" } else { "" }.to_string(),
        ]
    }
}

/// Read-only batch list. Remaining quantities belong to the backend; this
/// screen only observes them.
#[component]
#[allow(non_snake_case)]
pub fn InventoryBatchList() -> impl IntoView {
    let (rows, set_rows) = signal::<Vec<BatchRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let toast = use_toast();

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let batches = match api::fetch_all().await {
                Ok(list) => list,
                Err(e) => {
                    toast.error(e.to_string());
                    set_loading.set(false);
                    return;
                }
            };
            // thresholds come from the product catalog
            let thresholds: HashMap<Uuid, u32> = match product_api::fetch_all().await {
                Ok(products) => products
                    .into_iter()
                    .map(|p| (p.id, p.slow_moving_threshold))
                    .collect(),
                Err(_) => HashMap::new(),
            };
            let now = Utc::now();
            set_rows.set(
                batches
                    .into_iter()
                    .map(|batch| {
                        let slow_moving = thresholds
                            .get(&batch.product_id)
                            .map(|days| batch.is_slow_moving(*days, now))
                            .unwrap_or(false);
                        BatchRow { batch, slow_moving }
                    })
                    .collect(),
            );
            set_loading.set(false);
        });
    };

    let export_csv = move || match export_to_csv(&rows.get(), "lo-hang-ton.csv") {
        Ok(()) => toast.success("Đã xuất file CSV"),
        Err(e) => toast.warning(e),
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Lô hàng tồn kho"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| export_csv()>
                        {icon("file-text")}
                        {"Xuất CSV"}
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
                            <th class="table__header-cell">{"Mã lô"}</th>
                            <th class="table__header-cell">{"Sản phẩm"}</th>
                            <th class="table__header-cell">{"Vị trí kho"}</th>
                            <th class="table__header-cell">{"SL ban đầu"}</th>
                            <th class="table__header-cell">{"SL còn"}</th>
                            <th class="table__header-cell">{"Giá nhập"}</th>
                            <th class="table__header-cell">{"Cảnh báo"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="7">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            rows.get().into_iter().map(|row| {
                                let remaining_class = if row.batch.remaining_quantity > 0.0 {
                                    "table__cell table__cell--positive"
                                } else {
                                    "table__cell table__cell--negative"
                                };
                                view! {
                                    <tr class="table__row" class:table__row--warning=row.slow_moving>
                                        <td class="table__cell"><span class="tag tag--blue">{row.batch.batch_code.clone()}</span></td>
                                        <td class="table__cell">{row.batch.product_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{row.batch.location_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{format_quantity(row.batch.initial_quantity)}</td>
                                        <td class=remaining_class>{format_quantity(row.batch.remaining_quantity)}</td>
                                        <td class="table__cell">{format_vnd(row.batch.unit_cost)}</td>
                                        <td class="table__cell">
                                            {row.slow_moving.then(|| view! {
                                                <span class="tag tag--orange">{"Chậm luân chuyển"}</span>
                                            })}
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
