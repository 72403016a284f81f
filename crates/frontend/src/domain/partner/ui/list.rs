use contracts::domain::partner::{Partner, PartnerType};
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::partner::api;
use crate::domain::partner::ui::details::PartnerDetails;
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::shared::toast::use_toast;

struct PartnerRow(Partner);

impl CsvExportable for PartnerRow {
    fn headers() -> Vec<&'static str> {
        vec!["Tên", "Email", "Điện thoại", "Địa chỉ", "Trạng thái"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.0.name.clone(),
            self.0.email.clone().unwrap_or_default(),
            self.0.phone.clone().unwrap_or_default(),
            self.0.address.clone().unwrap_or_default(),
            if self.0.active { "Đang hợp tác" } else { "Ngừng hợp tác" }.to_string(),
        ]
    }
}

/// Suppliers and customers share this list; `partner_type` picks the slice.
#[component]
#[allow(non_snake_case)]
pub fn PartnerList(partner_type: PartnerType) -> impl IntoView {
    let (items, set_items) = signal::<Vec<Partner>>(Vec::new());
    let (search, set_search) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let toast = use_toast();
    let modal_stack = use_modal_stack();

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_type(partner_type).await {
                Ok(list) => set_items.set(list),
                Err(e) => toast.error(e.to_string()),
            }
            set_loading.set(false);
        });
    };

    // empty search shows the full list
    let filtered = move || {
        let term = search.get().to_lowercase();
        items
            .get()
            .into_iter()
            .filter(|p| {
                term.is_empty()
                    || p.name.to_lowercase().contains(&term)
                    || p.phone
                        .as_deref()
                        .map(|v| v.to_lowercase().contains(&term))
                        .unwrap_or(false)
                    || p.email
                        .as_deref()
                        .map(|v| v.to_lowercase().contains(&term))
                        .unwrap_or(false)
            })
            .collect::<Vec<_>>()
    };

    let open_details = move |id: Option<Uuid>| {
        modal_stack.push(move |handle| {
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
            view! {
                <PartnerDetails
                    id=id
                    partner_type=partner_type
                    on_saved=on_saved
                    on_cancel=on_cancel
                />
            }
            .into_any()
        });
    };

    let delete = move |partner: Partner| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Xóa \"{}\"?", partner.name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove(partner.id).await {
                Ok(message) => {
                    toast.success(message.unwrap_or_else(|| "Đã xóa đối tác".to_string()));
                    fetch();
                }
                Err(e) => toast.error(e.to_string()),
            }
        });
    };

    let export_csv = move || {
        let rows: Vec<PartnerRow> = filtered().into_iter().map(PartnerRow).collect();
        let filename = match partner_type {
            PartnerType::Supplier => "nha-cung-cap.csv",
            PartnerType::Customer => "khach-hang.csv",
        };
        match export_to_csv(&rows, filename) {
            Ok(()) => toast.success("Đã xuất file CSV"),
            Err(e) => toast.warning(e),
        }
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{partner_type.label()}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        {format!("Thêm {}", partner_type.label().to_lowercase())}
                    </button>
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

            <div class="filter-bar">
                {icon("search")}
                <input
                    type="text"
                    class="filter-bar__input"
                    placeholder="Tìm theo tên, điện thoại, email..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Tên"}</th>
                            <th class="table__header-cell">{"Email"}</th>
                            <th class="table__header-cell">{"Điện thoại"}</th>
                            <th class="table__header-cell">{"Địa chỉ"}</th>
                            <th class="table__header-cell">{"Trạng thái"}</th>
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
                            filtered().into_iter().map(|partner| {
                                let id = partner.id;
                                let for_delete = partner.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{partner.name.clone()}</td>
                                        <td class="table__cell">{partner.email.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{partner.phone.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">{partner.address.clone().unwrap_or_else(|| "-".into())}</td>
                                        <td class="table__cell">
                                            <span class=if partner.active { "tag tag--green" } else { "tag tag--red" }>
                                                {if partner.active { "Đang hợp tác" } else { "Ngừng hợp tác" }}
                                            </span>
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
