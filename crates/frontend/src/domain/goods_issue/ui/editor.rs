//! Goods-issue editor: header on the left, the outbound allocation ledger
//! on the right. Lines reference existing batches, carry their remaining
//! quantity as the cap, and a second pick of the same batch is refused.

use contracts::alloc::assembler::{assemble_issue, IssueHeader};
use contracts::alloc::ledger::NewLine;
use contracts::alloc::{AllocationLedger, DuplicatePolicy, QuantityPrecision};
use contracts::domain::goods_issue::IssueType;
use contracts::domain::partner::{Partner, PartnerType};
use contracts::domain::product::Product;
use leptos::prelude::*;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::goods_issue::api;
use crate::domain::goods_issue::ui::batch_picker::BatchPicker;
use crate::domain::partner::api as partner_api;
use crate::domain::product::api as product_api;
use crate::domain::product::ui::list::filter_products;
use crate::shared::date_utils::{datetime_local_value, parse_datetime_local};
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::number_format::format_quantity;
use crate::shared::runtime;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

#[component]
pub fn GoodsIssueEditor(on_saved: Rc<dyn Fn(())>, on_cancel: Rc<dyn Fn(())>) -> impl IntoView {
    let toast = use_toast();
    let modal_stack = use_modal_stack();
    let (auth_state, _) = use_auth();

    let (products, set_products) = signal::<Vec<Product>>(Vec::new());
    let (customers, set_customers) = signal::<Vec<Partner>>(Vec::new());
    let (search, set_search) = signal(String::new());

    let ledger = RwSignal::new(AllocationLedger::new(QuantityPrecision::Issue));
    let (code, set_code) = signal(String::new());
    let (issue_type, set_issue_type) = signal(IssueType::Sale);
    let (customer_id, set_customer_id) = signal(Option::<Uuid>::None);
    let (date_input, set_date_input) = signal(datetime_local_value(&runtime::now_local()));
    let (submitting, set_submitting) = signal(false);

    wasm_bindgen_futures::spawn_local(async move {
        match product_api::fetch_active().await {
            Ok(list) => set_products.set(list),
            Err(_) => toast.error("Không thể tải danh sách sản phẩm"),
        }
        match partner_api::fetch_by_type(PartnerType::Customer).await {
            Ok(list) => set_customers.set(list),
            Err(_) => toast.error("Không thể tải danh sách khách hàng"),
        }
    });

    // type to find a product, pick it to choose one of its batches
    let open_batch_picker = move |product: Product| {
        set_search.set(String::new());
        modal_stack.push_with_frame(
            Some("max-width: min(860px, 95vw); width: min(860px, 95vw);".to_string()),
            move |handle| {
                let on_select = Arc::new(move |line: NewLine| {
                    ledger.update(|l| {
                        match l.add(line, DuplicatePolicy::Reject) {
                            Ok(_) => toast.success("Đã thêm lô hàng vào phiếu xuất!"),
                            // "already added" leaves the ledger untouched
                            Err(e) => toast.warning(e.to_string()),
                        }
                    });
                });
                let on_cancel = Rc::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! {
                    <BatchPicker
                        product=product.clone()
                        on_select=on_select
                        on_cancel=on_cancel
                    />
                }
                .into_any()
            },
        );
    };

    let change_quantity = move |key: u64, raw: String| {
        let Ok(quantity) = raw.parse::<f64>() else { return };
        ledger.update(|l| {
            if let Err(e) = l.change_quantity(key, quantity) {
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
                toast.warning("Ngày xuất không hợp lệ");
                return;
            };
            let header = IssueHeader {
                code: code.get(),
                date,
                issue_type: issue_type.get(),
                customer_id: customer_id.get(),
                created_by_id: auth_state.get().user_id().unwrap_or_default(),
            };
            let payload = match assemble_issue(&header, &ledger.get(), runtime::random_code_suffix())
            {
                Ok(payload) => payload,
                Err(e) => {
                    toast.warning(e.to_string());
                    return;
                }
            };

            set_submitting.set(true);
            let on_saved = on_saved.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create(&payload).await {
                    Ok(_) => {
                        toast.success("Tạo phiếu xuất kho thành công!");
                        (on_saved)(());
                    }
                    Err(e) => toast.error(e.to_string()),
                }
                set_submitting.set(false);
            });
        }
    };

    view! {
        <div class="editor">
            <div class="editor__header">
                <h3>{"Tạo phiếu xuất kho"}</h3>
            </div>

            <div class="editor__body">
                <div class="editor__sidebar">
                    <div class="form-group">
                        <label for="issue-code">{"Mã phiếu xuất"}</label>
                        <input
                            type="text"
                            id="issue-code"
                            prop:value=move || code.get()
                            on:input=move |ev| set_code.set(event_target_value(&ev))
                            placeholder="Để trống để tự động tạo mã"
                        />
                    </div>

                    <div class="form-group">
                        <label for="issue-type">{"Loại phiếu"}</label>
                        <select
                            id="issue-type"
                            prop:value=move || match issue_type.get() {
                                IssueType::Sale => "SALE",
                                IssueType::Cancel => "CANCEL",
                            }
                            on:change=move |ev| {
                                set_issue_type.set(match event_target_value(&ev).as_str() {
                                    "CANCEL" => IssueType::Cancel,
                                    _ => IssueType::Sale,
                                });
                            }
                        >
                            <option value="SALE">{IssueType::Sale.label()}</option>
                            <option value="CANCEL">{IssueType::Cancel.label()}</option>
                        </select>
                    </div>

                    <Show when=move || issue_type.get().requires_customer()>
                        <div class="form-group">
                            <label for="issue-customer">{"Khách hàng"}</label>
                            <select
                                id="issue-customer"
                                prop:value=move || customer_id.get().map(|id| id.to_string()).unwrap_or_default()
                                on:change=move |ev| {
                                    set_customer_id.set(event_target_value(&ev).parse::<Uuid>().ok());
                                }
                            >
                                <option value="">{"-- Chọn khách hàng --"}</option>
                                {move || customers.get().into_iter().map(|customer| {
                                    let label = match &customer.phone {
                                        Some(phone) => format!("{} - {}", customer.name, phone),
                                        None => customer.name.clone(),
                                    };
                                    view! { <option value=customer.id.to_string()>{label}</option> }
                                }).collect_view()}
                            </select>
                        </div>
                    </Show>

                    <div class="form-group">
                        <label for="issue-date">{"Ngày xuất"}</label>
                        <input
                            type="datetime-local"
                            id="issue-date"
                            prop:value=move || date_input.get()
                            on:input=move |ev| set_date_input.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="stat">
                        <div class="stat__title">{"Tổng số lượng (đơn vị cơ bản)"}</div>
                        <div class="stat__value">{move || format_quantity(ledger.get().total_base_quantity())}</div>
                    </div>
                    <div class="stat">
                        <div class="stat__title">{"Số lô hàng"}</div>
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
                                placeholder="Tìm kiếm sản phẩm để chọn lô hàng..."
                                prop:value=move || search.get()
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-hint">
                            {"Gõ tên hoặc SKU sản phẩm, click chọn để mở cửa sổ chọn lô hàng"}
                        </div>
                        <Show when=move || !search.get().trim().is_empty()>
                            <div class="search-results">
                                {move || {
                                    filter_products(&products.get(), &search.get())
                                        .into_iter()
                                        .map(|product| {
                                            let for_pick = product.clone();
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
                                                    on:click=move |_| open_batch_picker(for_pick.clone())
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
                                    <th class="table__header-cell">{"Sản phẩm"}</th>
                                    <th class="table__header-cell">{"Mã lô"}</th>
                                    <th class="table__header-cell">{"Vị trí"}</th>
                                    <th class="table__header-cell">{"Đơn vị"}</th>
                                    <th class="table__header-cell">{"SL xuất"}</th>
                                    <th class="table__header-cell">{"SL còn (Base)"}</th>
                                    <th class="table__header-cell"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let lines = ledger.get().lines().to_vec();
                                    if lines.is_empty() {
                                        return view! {
                                            <tr><td class="table__cell" colspan="7">
                                                {"Chưa có lô hàng nào. Tìm kiếm sản phẩm và chọn lô hàng để xuất kho."}
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
                                        let remaining = line.remaining_snapshot.unwrap_or(0.0);
                                        let remaining_class = if remaining > 0.0 {
                                            "table__cell table__cell--positive"
                                        } else {
                                            "table__cell table__cell--negative"
                                        };
                                        view! {
                                            <tr class="table__row">
                                                <td class="table__cell">{line.product_name.clone()}</td>
                                                <td class="table__cell"><span class="tag tag--blue">{line.batch_code.clone()}</span></td>
                                                <td class="table__cell">{line.location_name.clone().unwrap_or_else(|| "-".into())}</td>
                                                <td class="table__cell">
                                                    <select
                                                        prop:value=line.unit.unit_name.clone()
                                                        on:change=move |ev| change_unit(key, product_id, event_target_value(&ev))
                                                    >
                                                        {unit_options.into_iter().map(|unit| {
                                                            view! { <option value=unit.unit_name.clone()>{unit.unit_name.clone()}</option> }
                                                        }).collect_view()}
                                                    </select>
                                                </td>
                                                <td class="table__cell">
                                                    <input
                                                        type="number"
                                                        min="0.01"
                                                        step="any"
                                                        max=line.max_quantity().map(|m| m.to_string()).unwrap_or_default()
                                                        prop:value=line.quantity.to_string()
                                                        on:change=move |ev| change_quantity(key, event_target_value(&ev))
                                                    />
                                                </td>
                                                <td class=remaining_class>{format_quantity(remaining)}</td>
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
                                    <td class="table__cell" colspan="2">
                                        <strong>{move || format!("{} lô hàng", ledger.get().len())}</strong>
                                    </td>
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
                    {move || if submitting.get() { "Đang lưu..." } else { "Lưu phiếu xuất" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| (on_cancel)(())>
                    {icon("cancel")}
                    {"Hủy"}
                </button>
            </div>
        </div>
    }
}
