//! Batch picker for the issue editor: shows a product's open batches, lets
//! the user choose unit and quantity, and validates against the remaining
//! stock before handing the line back.

use contracts::alloc::ledger::NewLine;
use contracts::alloc::units::max_orderable;
use contracts::domain::batch::InventoryBatch;
use contracts::domain::product::Product;
use leptos::prelude::*;
use std::rc::Rc;
use std::sync::Arc;

use crate::domain::batch::api as batch_api;
use crate::shared::icons::icon;
use crate::shared::number_format::format_quantity;
use crate::shared::toast::use_toast;

#[component]
pub fn BatchPicker(
    product: Product,
    on_select: Arc<dyn Fn(NewLine) + Send + Sync>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let toast = use_toast();
    let (batches, set_batches) = signal::<Vec<InventoryBatch>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (selected, set_selected) = signal(Option::<InventoryBatch>::None);
    let units = product.selectable_units();
    let (selected_unit, set_selected_unit) = signal(units.first().cloned());
    let (quantity_input, set_quantity_input) = signal("1".to_string());

    let product_id = product.id;
    let product_name = product.name.clone();
    let base_unit = product.base_unit.clone();
    let title = format!("Chọn lô hàng - {}", product.name);
    let info = format!(
        "Sản phẩm: {} ({}) - Đơn vị gốc: {}",
        product.name, product.sku, product.base_unit
    );

    wasm_bindgen_futures::spawn_local(async move {
        match batch_api::fetch_by_product(product_id).await {
            Ok(list) => set_batches.set(list),
            Err(e) => toast.error(e.to_string()),
        }
        set_loading.set(false);
    });

    // maximum orderable in the chosen unit, truncated to two decimals
    let max_quantity = move || match (selected.get(), selected_unit.get()) {
        (Some(batch), Some(unit)) => max_orderable(batch.remaining_quantity, unit.ratio_to_base),
        _ => 0.0,
    };

    let unit_options = units
        .iter()
        .map(|unit| {
            (
                unit.unit_name.clone(),
                format!(
                    "{} (1{} = {}{})",
                    unit.unit_name, unit.unit_name, unit.ratio_to_base, base_unit
                ),
            )
        })
        .collect::<Vec<_>>();
    let units_for_change = units.clone();

    let confirm = {
        let on_select = on_select.clone();
        move || {
            let Some(batch) = selected.get() else {
                toast.warning("Vui lòng chọn lô hàng!");
                return;
            };
            let Some(unit) = selected_unit.get() else {
                toast.warning("Vui lòng chọn đơn vị!");
                return;
            };
            let quantity = quantity_input.get().parse::<f64>().unwrap_or(0.0);
            if quantity <= 0.0 {
                toast.warning("Số lượng phải lớn hơn 0!");
                return;
            }
            let max = max_orderable(batch.remaining_quantity, unit.ratio_to_base);
            if quantity > max {
                toast.warning(format!(
                    "Số lượng không được vượt quá {} {}!",
                    format_quantity(max),
                    unit.unit_name
                ));
                return;
            }

            (on_select)(NewLine {
                batch_id: batch.id,
                batch_code: batch.batch_code.clone(),
                product_id,
                product_name: product_name.clone(),
                location_id: Some(batch.location_id),
                location_name: batch.location_name.clone(),
                unit,
                quantity,
                remaining_snapshot: Some(batch.remaining_quantity),
                unit_price: None,
            });

            // keep the picker open for further batches
            set_selected.set(None);
            set_quantity_input.set("1".to_string());
        }
    };

    let base_unit_summary = base_unit.clone();
    let base_unit_hint = base_unit.clone();

    view! {
        <div class="details-container batch-picker">
            <div class="details-header">
                <h3>{title}</h3>
            </div>

            <div class="info-box">{info}</div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell"></th>
                            <th class="table__header-cell">{"Mã lô"}</th>
                            <th class="table__header-cell">{"Vị trí"}</th>
                            <th class="table__header-cell">{"SL còn (Base)"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="4">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            batches.get().into_iter().map(|batch| {
                                let batch_id = batch.id;
                                let for_select = batch.clone();
                                let is_selected = move || selected.get().map(|b| b.id) == Some(batch_id);
                                let remaining_class = if batch.remaining_quantity > 0.0 {
                                    "table__cell table__cell--positive"
                                } else {
                                    "table__cell table__cell--negative"
                                };
                                view! {
                                    <tr
                                        class="table__row"
                                        class:table__row--selected=is_selected
                                        on:click=move |_| {
                                            set_selected.set(Some(for_select.clone()));
                                            set_quantity_input.set("1".to_string());
                                        }
                                    >
                                        <td class="table__cell">
                                            <input type="radio" prop:checked=is_selected />
                                        </td>
                                        <td class="table__cell"><span class="tag tag--blue">{batch.batch_code.clone()}</span></td>
                                        <td class="table__cell">{batch.location_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class=remaining_class>{format_quantity(batch.remaining_quantity)}</td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
            </div>

            <Show when=move || selected.get().is_some()>
                <div class="picker-panel">
                    <h4>{"Thông tin xuất kho"}</h4>
                    <div class="picker-panel__summary">
                        {
                            let base_unit = base_unit_summary.clone();
                            move || selected.get().map(|batch| format!(
                                "Lô hàng: {} | Vị trí: {} | Tồn kho (base): {} {}",
                                batch.batch_code,
                                batch.location_name.unwrap_or_else(|| "-".into()),
                                format_quantity(batch.remaining_quantity),
                                base_unit,
                            ))
                        }
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Đơn vị xuất"}</label>
                            <select
                                prop:value=move || selected_unit.get().map(|u| u.unit_name).unwrap_or_default()
                                on:change={
                                    let units = units_for_change.clone();
                                    move |ev| {
                                        let name = event_target_value(&ev);
                                        set_selected_unit.set(units.iter().find(|u| u.unit_name == name).cloned());
                                        set_quantity_input.set("1".to_string());
                                    }
                                }
                            >
                                {unit_options.iter().map(|(value, label)| {
                                    view! { <option value=value.clone()>{label.clone()}</option> }
                                }).collect_view()}
                            </select>
                        </div>

                        <div class="form-group">
                            <label>
                                {"Số lượng xuất "}
                                {move || selected_unit.get().map(|unit| format!(
                                    "(Tối đa: {} {})",
                                    format_quantity(max_quantity()),
                                    unit.unit_name
                                ))}
                            </label>
                            <input
                                type="number"
                                min="0.01"
                                step="any"
                                prop:value=move || quantity_input.get()
                                on:input=move |ev| set_quantity_input.set(event_target_value(&ev))
                            />
                        </div>

                        <button
                            class="btn btn-primary"
                            on:click={
                                let confirm = confirm.clone();
                                move |_| confirm()
                            }
                            disabled=move || selected_unit.get().is_none()
                        >
                            {icon("plus")}
                            {"Thêm vào phiếu"}
                        </button>
                    </div>

                    {
                        let base_unit = base_unit_hint.clone();
                        move || {
                            let quantity = quantity_input.get().parse::<f64>().unwrap_or(0.0);
                            match selected_unit.get() {
                                Some(unit) if quantity > 0.0 => Some(view! {
                                    <div class="picker-panel__hint">
                                        <b>{"Quy đổi: "}</b>
                                        {format!(
                                            "{} {} = {} {}",
                                            format_quantity(quantity),
                                            unit.unit_name,
                                            format_quantity(quantity * unit.ratio_to_base),
                                            base_unit
                                        )}
                                    </div>
                                }),
                                _ => None,
                            }
                        }
                    }
                </div>
            </Show>

            <div class="details-actions">
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Đóng"}
                </button>
            </div>
        </div>
    }
}
