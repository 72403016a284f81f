//! Goods-receipt editor: header form on the left, the allocation ledger of
//! incoming lines on the right. Inbound lines target lots that do not exist
//! yet, so they are scoped by product id and carry no remaining-quantity
//! cap; repeats of the same product+unit merge additively.

use contracts::alloc::assembler::{assemble_receipt, ReceiptHeader};
use contracts::alloc::ledger::NewLine;
use contracts::alloc::{AllocationLedger, DuplicatePolicy, QuantityPrecision};
use contracts::domain::location::Location;
use contracts::domain::partner::{Partner, PartnerType};
use contracts::domain::product::Product;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::goods_receipt::api;
use crate::domain::location::api as location_api;
use crate::domain::partner::api as partner_api;
use crate::domain::product::api as product_api;
use crate::domain::product::ui::list::filter_products;
use crate::shared::date_utils::{datetime_local_value, parse_datetime_local};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_quantity, format_vnd};
use crate::shared::runtime;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

#[component]
pub fn GoodsReceiptEditor(on_saved: Rc<dyn Fn(())>, on_cancel: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let (auth_state, _) = use_auth();

    let (products, set_products) = signal::<Vec<Product>>(Vec::new());
    let (suppliers, set_suppliers) = signal::<Vec<Partner>>(Vec::new());
    let (locations, set_locations) = signal::<Vec<Location>>(Vec::new());
    let (search, set_search) = signal(String::new());

    let ledger = RwSignal::new(AllocationLedger::new(QuantityPrecision::Receipt));
    let (code, set_code) = signal(String::new());
    let (partner_id, set_partner_id) = signal(Option::<Uuid>::None);
    let (date_input, set_date_input) = signal(datetime_local_value(&runtime::now_local()));
    let (submitting, set_submitting) = signal(false);

    // reference data for the pickers
    wasm_bindgen_futures::spawn_local(async move {
        match product_api::fetch_active().await {
            Ok(list) => set_products.set(list),
            Err(_) => toast.error("Không thể tải danh sách sản phẩm"),
        }
        match partner_api::fetch_by_type(PartnerType::Supplier).await {
            Ok(list) => set_suppliers.set(list),
            Err(_) => toast.error("Không thể tải danh sách nhà cung cấp"),
        }
        match location_api::fetch_all().await {
            Ok(list) => set_locations.set(list),
            Err(_) => toast.error("Không thể tải danh sách vị trí"),
        }
    });

    let add_product = move |product: Product| {
        let Some(unit) = product.selectable_units().into_iter().next() else {
            toast.warning("Sản phẩm chưa khai báo đơn vị");
            return;
        };
        let default_location = locations.get().into_iter().next();
        let line = NewLine {
            // inbound: the product scopes the line, the lot does not exist yet
            batch_id: product.id,
            batch_code: product.sku.clone(),
            product_id: product.id,
            product_name: product.name.clone(),
            location_id: default_location.as_ref().map(|l| l.id),
            location_name: default_location.map(|l| l.name),
            unit,
            quantity: 1.0,
            remaining_snapshot: None,
            unit_price: Some(0.0),
        };
        ledger.update(|l| {
            if let Err(e) = l.add(line, DuplicatePolicy::Merge) {
                toast.warning(e.to_string());
            }
        });
        set_search.set(String::new());
    };

    let change_quantity = move |key: u64, raw: String| {
        let Ok(quantity) = raw.parse::<f64>() else { return };
        ledger.update(|l| {
            if let Err(e) = l.change_quantity(key, quantity) {
                toast.warning(e.to_string());
            }
        });
    };

    let change_price = move |key: u64, raw: String| {
        let Ok(price) = raw.parse::<f64>() else { return };
        ledger.update(|l| {
            if let Err(e) = l.change_unit_price(key, price) {
                toast.warning(e.to_string());
            }
        });
    };

    let change_unit = move |key: u64, product_id: Uuid, unit_name: String| {
        let Some(product) = products.get().into_iter().find(|p| p.id == product_id) else {
            return;
        };
        let Some(unit) = product
            .selectable_units()
            .into_iter()
            .find(|u| u.unit_name == unit_name)
        else {
            return;
        };
        ledger.update(|l| {
            if let Err(e) = l.change_unit(key, unit) {
                toast.warning(e.to_string());
            }
        });
    };

    let change_location = move |key: u64, raw: String| {
        let Ok(location_id) = raw.parse::<Uuid>() else { return };
        let name = locations
            .get()
            .into_iter()
            .find(|l| l.id == location_id)
            .map(|l| l.name);
        ledger.update(|l| {
            if let Err(e) = l.change_location(key, location_id, name) {
                toast.warning(e.to_string());
            }
        });
    };

    let remove_line = move |key: u64| {
        ledger.update(|l| {
            let _ = l.remove(key);
        });
    };

    let submit = {
        let on_saved = on_saved.clone();
        move || {
            if submitting.get() {
                return;
            }
            let Some(date) = parse_datetime_local(&date_input.get()) else {
                toast.warning("Ngày nhập không hợp lệ");
                return;
            };
            let header = ReceiptHeader {
                code: code.get(),
                date,
                partner_id: partner_id.get(),
                created_by_id: auth_state.get().user_id().unwrap_or_default(),
                paid_amount: 0.0,
            };
            let payload =
                match assemble_receipt(&header, &ledger.get(), runtime::random_code_suffix()) {
                    Ok(payload) => payload,
                    Err(e) => {
                        toast.warning(e.to_string());
                        return;
                    }
                };

            // submit guard: no duplicate documents from a double click
            set_submitting.set(true);
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create(&payload).await {
                    Ok(_) => {
                        toast.success("Tạo phiếu nhập kho thành công!");
                        (on_saved)(());
                    }
                    // server message verbatim; ledger state stays intact
                    Err(e) => toast.error(e.to_string()),
                }
                set_submitting.set(false);
            });
        }
    };

    view! {
        <div class="editor">
            <div class="editor__header">
                <h3>{"Thêm phiếu nhập kho"}</h3>
            </div>

            <div class="editor__body">
                <div class="editor__sidebar">
                    <div class="form-group">
                        <label for="receipt-code">{"Mã phiếu nhập"}</label>
                        <input
                            type="text"
                            id="receipt-code"
                            prop:value=move || code.get()
                            on:input=move |ev| set_code.set(event_target_value(&ev))
                            placeholder="VD: PN0001 hoặc để trống để tự tạo"
                        />
                    </div>

                    <div class="form-group">
                        <label for="receipt-partner">{"Nhà cung cấp"}</label>
                        <select
                            id="receipt-partner"
                            prop:value=move || partner_id.get().map(|id| id.to_string()).unwrap_or_default()
                            on:change=move |ev| {
                                set_partner_id.set(event_target_value(&ev).parse::<Uuid>().ok());
                            }
                        >
                            <option value="">{"-- Chọn nhà cung cấp --"}</option>
                            {move || suppliers.get().into_iter().map(|partner| {
                                view! { <option value=partner.id.to_string()>{partner.name}</option> }
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="receipt-date">{"Ngày nhập"}</label>
                        <input
                            type="datetime-local"
                            id="receipt-date"
                            prop:value=move || date_input.get()
                            on:input=move |ev| set_date_input.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="stat">
                        <div class="stat__title">{"Tổng tiền"}</div>
                        <div class="stat__value">{move || format_vnd(ledger.get().total_amount())}</div>
                        <div class="stat__hint">{"Tổng tiền được tính tự động"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat__title">{"Số dòng hàng"}</div>
                        <div class="stat__value">{move || ledger.get().len()}</div>
                    </div>
                </div>

                <div class="editor__main">
                    <div class="form-group">
                        <div class="filter-bar">
                            {icon("search")}
                            <input
                                type="text"
                                class="filter-bar__input"
                                placeholder="Tìm kiếm sản phẩm theo tên hoặc SKU..."
                                prop:value=move || search.get()
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                            />
                        </div>
                        <Show when=move || !search.get().trim().is_empty()>
                            <div class="search-results">
                                {move || {
                                    filter_products(&products.get(), &search.get())
                                        .into_iter()
                                        .map(|product| {
                                            let for_add = product.clone();
                                            let units = product
                                                .conversions
                                                .iter()
                                                .filter(|c| !c.is_base())
                                                .map(|c| c.unit_name.clone())
                                                .collect::<Vec<_>>()
                                                .join(", ");
                                            view! {
                                                <div
                                                    class="search-results__item"
                                                    on:click=move |_| add_product(for_add.clone())
                                                >
                                                    <div>
                                                        <strong>{product.sku.clone()}</strong>
                                                        {" - "}
                                                        {product.name.clone()}
                                                    </div>
                                                    <div class="search-results__hint">
                                                        {format!("Đơn vị: {} | Quy đổi: {}", product.base_unit, units)}
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </Show>
                    </div>

                    <div class="table">
                        <table class="table__data">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">{"SKU"}</th>
                                    <th class="table__header-cell">{"Tên sản phẩm"}</th>
                                    <th class="table__header-cell">{"Vị trí"}</th>
                                    <th class="table__header-cell">{"Đơn vị nhập"}</th>
                                    <th class="table__header-cell">{"Số lượng"}</th>
                                    <th class="table__header-cell">{"Đơn giá"}</th>
                                    <th class="table__header-cell">{"Thành tiền"}</th>
                                    <th class="table__header-cell"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let lines = ledger.get().lines().to_vec();
                                    if lines.is_empty() {
                                        return view! {
                                            <tr><td class="table__cell" colspan="8">
                                                {"Chưa có sản phẩm nào. Tìm kiếm sản phẩm để thêm vào phiếu."}
                                            </td></tr>
                                        }.into_any();
                                    }
                                    lines.into_iter().map(|line| {
                                        let key = line.key;
                                        let product_id = line.product_id;
                                        let unit_options = products
                                            .get()
                                            .into_iter()
                                            .find(|p| p.id == product_id)
                                            .map(|p| p.selectable_units())
                                            .unwrap_or_default();
                                        let current_unit = line.unit.unit_name.clone();
                                        view! {
                                            <tr class="table__row">
                                                <td class="table__cell">{line.batch_code.clone()}</td>
                                                <td class="table__cell">{line.product_name.clone()}</td>
                                                <td class="table__cell">
                                                    <select
                                                        prop:value=line.location_id.map(|id| id.to_string()).unwrap_or_default()
                                                        on:change=move |ev| change_location(key, event_target_value(&ev))
                                                    >
                                                        <option value="">{"-- Vị trí --"}</option>
                                                        {locations.get().into_iter().map(|location| {
                                                            view! { <option value=location.id.to_string()>{location.name}</option> }
                                                        }).collect_view()}
                                                    </select>
                                                </td>
                                                <td class="table__cell">
                                                    <select
                                                        prop:value=current_unit
                                                        on:change=move |ev| change_unit(key, product_id, event_target_value(&ev))
                                                    >
                                                        {unit_options.into_iter().map(|unit| {
                                                            let label = if unit.is_base() {
                                                                format!("{} (Cơ bản)", unit.unit_name)
                                                            } else {
                                                                unit.unit_name.clone()
                                                            };
                                                            view! { <option value=unit.unit_name.clone()>{label}</option> }
                                                        }).collect_view()}
                                                    </select>
                                                </td>
                                                <td class="table__cell">
                                                    <input
                                                        type="number"
                                                        min="0.001"
                                                        step="any"
                                                        prop:value=line.quantity.to_string()
                                                        on:change=move |ev| change_quantity(key, event_target_value(&ev))
                                                    />
                                                </td>
                                                <td class="table__cell">
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        step="any"
                                                        prop:value=line.unit_price.unwrap_or(0.0).to_string()
                                                        on:change=move |ev| change_price(key, event_target_value(&ev))
                                                    />
                                                </td>
                                                <td class="table__cell"><strong>{format_vnd(line.amount())}</strong></td>
                                                <td class="table__cell">
                                                    <button class="button button--small button--danger" on:click=move |_| remove_line(key)>
                                                        {icon("delete")}
                                                        {"Xóa"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view().into_any()
                                }}
                            </tbody>
                            <tfoot>
                                <tr>
                                    <td class="table__cell" colspan="4"><strong>{"Tổng cộng"}</strong></td>
                                    <td class="table__cell"><strong>{move || format_quantity(ledger.get().total_base_quantity())}</strong></td>
                                    <td class="table__cell"></td>
                                    <td class="table__cell"><strong>{move || format_vnd(ledger.get().total_amount())}</strong></td>
                                    <td class="table__cell"></td>
                                </tr>
                            </tfoot>
                        </table>
                    </div>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| submit()
                    disabled=move || submitting.get()
                >
                    {icon("save")}
                    {move || if submitting.get() { "Đang lưu..." } else { "Lưu phiếu nhập" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
