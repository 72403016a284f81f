use contracts::domain::product::Product;
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::product::api;
use crate::domain::product::ui::details::ProductDetails;
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::toast::use_toast;

/// Name/SKU filter; an empty search term returns the full list unfiltered.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let term = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            term.is_empty()
                || p.name.to_lowercase().contains(&term)
                || p.sku.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (search, set_search) = signal(String::new());
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

    let filtered = move || filter_products(&items.get(), &search.get());

    let open_details = move |id: Option<Uuid>| {
        modal_stack.push_with_frame(
            Some("max-width: min(760px, 95vw); width: min(760px, 95vw);".to_string()),
            move |handle| {
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
                view! { <ProductDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
            },
        );
    };

    let toggle_active = move |id: Uuid| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::toggle_active(id).await {
                Ok(_) => fetch(),
                Err(e) => toast.error(e.to_string()),
            }
        });
    };

    let delete = move |product: Product| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Xóa sản phẩm \"{}\"?", product.name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove(product.id).await {
                Ok(message) => {
                    toast.success(message.unwrap_or_else(|| "Đã xóa sản phẩm".to_string()));
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
                    <h1 class="header__title">{"Sản phẩm"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {"Thêm sản phẩm"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Tải lại"}
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                {icon("search")}
                <input
                    type="text"
                    class="filter-bar__input"
                    placeholder="Tìm theo tên hoặc SKU..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"SKU"}</th>
                            <th class="table__header-cell">{"Tên sản phẩm"}</th>
                            <th class="table__header-cell">{"Danh mục"}</th>
                            <th class="table__header-cell">{"Đơn vị cơ bản"}</th>
                            <th class="table__header-cell">{"Quy đổi"}</th>
                            <th class="table__header-cell">{"Tồn tối thiểu"}</th>
                            <th class="table__header-cell">{"Trạng thái"}</th>
                            <th class="table__header-cell">{"Thao tác"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell" colspan="8">{"Đang tải..."}</td></tr>
                                }.into_any();
                            }
                            filtered().into_iter().map(|product| {
                                let id = product.id;
                                let for_delete = product.clone();
                                let conversions = product
                                    .conversions
                                    .iter()
                                    .filter(|c| !c.is_base())
                                    .map(|c| format!("{} (x{})", c.unit_name, c.ratio_to_base))
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{product.sku.clone()}</td>
                                        <td class="table__cell">{product.name.clone()}</td>
                                        <td class="table__cell">{product.category_name.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{product.base_unit.clone()}</td>
                                        <td class="table__cell">{if conversions.is_empty() { "-".to_string() } else { conversions }}</td>
                                        <td class="table__cell">{product.min_stock_level}</td>
                                        <td class="table__cell">
                                            <button
                                                class=if product.active { "tag tag--green" } else { "tag tag--red" }
                                                title="Bật / tắt sản phẩm"
                                                on:click=move |_| toggle_active(id)
                                            >
                                                {if product.active { "Đang bán" } else { "Ngừng bán" }}
                                            </button>
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

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: sku.into(),
            name: name.into(),
            base_unit: "kg".into(),
            category_id: None,
            category_name: None,
            min_stock_level: 0.0,
            slow_moving_threshold: 90,
            active: true,
            conversions: Vec::new(),
        }
    }

    // Empty search returns the full, unfiltered list.
    #[test]
    fn empty_search_returns_everything() {
        let products = vec![product("SP001", "Gạo ST25"), product("SP002", "Đường cát")];
        assert_eq!(filter_products(&products, "").len(), 2);
        assert_eq!(filter_products(&products, "sp001").len(), 1);
        assert_eq!(filter_products(&products, "gạo").len(), 1);
        assert_eq!(filter_products(&products, "không có").len(), 0);
    }
}
