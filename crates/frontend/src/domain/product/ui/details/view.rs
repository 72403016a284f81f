use super::view_model::ProductDetailsViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

#[component]
pub fn ProductDetails(
    id: Option<Uuid>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = ProductDetailsViewModel::new();
    vm.load_categories();
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container product-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Chỉnh sửa sản phẩm" } else { "Thêm sản phẩm mới" }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-group">
                    <label for="product-sku">{"Mã SKU"}</label>
                    <input
                        type="text"
                        id="product-sku"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().sku
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.sku = event_target_value(&ev))
                        }
                        placeholder="Nhập mã SKU..."
                    />
                </div>

                <div class="form-group">
                    <label for="product-name">{"Tên sản phẩm"}</label>
                    <input
                        type="text"
                        id="product-name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().name
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        }
                        placeholder="Nhập tên sản phẩm..."
                    />
                </div>

                <div class="form-group">
                    <label for="product-category">{"Danh mục"}</label>
                    <select
                        id="product-category"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || {
                                vm.form
                                    .get()
                                    .category_id
                                    .map(|id| id.to_string())
                                    .unwrap_or_default()
                            }
                        }
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| f.category_id = value.parse::<Uuid>().ok());
                            }
                        }
                    >
                        <option value="">{"-- Chọn danh mục --"}</option>
                        {
                            let vm = vm_clone.clone();
                            move || {
                                vm.categories
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        view! { <option value=c.id.to_string()>{c.name}</option> }
                                    })
                                    .collect_view()
                            }
                        }
                    </select>
                </div>

                <div class="form-group">
                    <label for="product-base-unit">{"Đơn vị cơ bản"}</label>
                    <div class="form-row">
                        <input
                            type="text"
                            id="product-base-unit"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().base_unit
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| vm.form.update(|f| f.base_unit = event_target_value(&ev))
                            }
                            placeholder="Ví dụ: gr, hộp, chai, lon,..."
                        />
                        <button
                            class="button button--secondary"
                            on:click={
                                let vm = vm_clone.clone();
                                move |_| vm.add_conversion()
                            }
                        >
                            {icon("plus")}
                            {"Thêm đơn vị"}
                        </button>
                    </div>
                </div>

                {
                    let vm = vm_clone.clone();
                    move || {
                        let conversions = vm.form.get().conversions;
                        if conversions.is_empty() {
                            return ().into_any();
                        }
                        let vm = vm.clone();
                        view! {
                            <label class="form-sublist-label">{"Đơn vị quy đổi khác"}</label>
                            {conversions
                                .into_iter()
                                .enumerate()
                                .map(|(index, conv)| {
                                    let vm_name = vm.clone();
                                    let vm_ratio = vm.clone();
                                    let vm_frac = vm.clone();
                                    let vm_remove = vm.clone();
                                    view! {
                                        <div class="form-row conversion-row">
                                            <input
                                                type="text"
                                                prop:value=conv.unit_name.clone()
                                                on:input=move |ev| {
                                                    vm_name.update_conversion(index, |c| {
                                                        c.unit_name = event_target_value(&ev);
                                                    });
                                                }
                                                placeholder="Tên đơn vị (kg, lốc, thùng,...)"
                                            />
                                            <input
                                                type="number"
                                                min="0"
                                                step="any"
                                                prop:value={if conv.ratio_to_base > 0.0 {
                                                    conv.ratio_to_base.to_string()
                                                } else {
                                                    String::new()
                                                }}
                                                on:input=move |ev| {
                                                    let parsed = event_target_value(&ev).parse::<f64>().unwrap_or(0.0);
                                                    vm_ratio.update_conversion(index, |c| c.ratio_to_base = parsed);
                                                }
                                                placeholder="Tỉ lệ so với cơ bản"
                                            />
                                            <label class="checkbox-label">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=conv.allow_fractional
                                                    on:change=move |ev| {
                                                        let checked = event_target_checked(&ev);
                                                        vm_frac.update_conversion(index, |c| c.allow_fractional = checked);
                                                    }
                                                />
                                                {"Cho phép số lẻ"}
                                            </label>
                                            <button
                                                class="button button--small button--danger"
                                                on:click=move |_| vm_remove.remove_conversion(index)
                                            >
                                                {icon("delete")}
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        }
                        .into_any()
                    }
                }

                <div class="form-group">
                    <label for="product-min-stock">{"Mức tồn tối thiểu"}</label>
                    <input
                        type="number"
                        id="product-min-stock"
                        min="0"
                        step="any"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().min_stock_level.to_string()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let parsed = event_target_value(&ev).parse::<f64>().unwrap_or(0.0);
                                vm.form.update(|f| f.min_stock_level = parsed);
                            }
                        }
                        placeholder="Nhập mức tồn tối thiểu..."
                    />
                </div>

                <div class="form-group">
                    <label for="product-slow-moving" title="Số ngày tối đa lô hàng được phép tồn kho trước khi bị cảnh báo chậm luân chuyển">
                        {"Ngưỡng chậm luân chuyển (ngày)"}
                    </label>
                    <input
                        type="number"
                        id="product-slow-moving"
                        min="1"
                        step="1"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().slow_moving_threshold.to_string()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let parsed = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                                vm.form.update(|f| f.slow_moving_threshold = parsed);
                            }
                        }
                        placeholder="Ví dụ: 90, 180, 365 ngày"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.saving.get()
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Cập nhật" } else { "Thêm mới" }
                    }
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
