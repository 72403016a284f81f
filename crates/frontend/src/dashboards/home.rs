//! Landing dashboard: stock health cards and a seven-day activity chart,
//! all computed client-side from the fetched lists.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use leptos::prelude::*;
use uuid::Uuid;

use crate::domain::batch::api as batch_api;
use crate::domain::goods_issue::api as issue_api;
use crate::domain::goods_receipt::api as receipt_api;
use crate::domain::product::api as product_api;
use crate::shared::icons::icon;
use crate::shared::runtime;
use crate::shared::toast::use_toast;

#[derive(Clone, Default)]
struct DashboardStats {
    product_count: usize,
    open_batch_count: usize,
    low_stock_count: usize,
    slow_moving_count: usize,
    // (day label, receipts, issues) for the last seven days
    activity: Vec<(String, usize, usize)>,
}

fn day_label(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

#[component]
fn StatCard(
    title: &'static str,
    icon_name: &'static str,
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__body">
                <div class="stat-card__title">{title}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn DashboardPage() -> impl IntoView {
    let toast = use_toast();
    let (stats, set_stats) = signal(DashboardStats::default());
    let (loading, set_loading) = signal(true);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let products = product_api::fetch_all().await.unwrap_or_default();
            let batches = match batch_api::fetch_all().await {
                Ok(list) => list,
                Err(e) => {
                    toast.error(e.to_string());
                    set_loading.set(false);
                    return;
                }
            };
            let receipts = receipt_api::fetch_all().await.unwrap_or_default();
            let issues = issue_api::fetch_all().await.unwrap_or_default();

            // remaining stock per product, in base units
            let mut remaining: HashMap<Uuid, f64> = HashMap::new();
            for batch in &batches {
                *remaining.entry(batch.product_id).or_insert(0.0) += batch.remaining_quantity;
            }
            let low_stock_count = products
                .iter()
                .filter(|p| p.active)
                .filter(|p| remaining.get(&p.id).copied().unwrap_or(0.0) < p.min_stock_level)
                .count();

            let thresholds: HashMap<Uuid, u32> = products
                .iter()
                .map(|p| (p.id, p.slow_moving_threshold))
                .collect();
            let now = Utc::now();
            let slow_moving_count = batches
                .iter()
                .filter(|b| {
                    thresholds
                        .get(&b.product_id)
                        .map(|days| b.is_slow_moving(*days, now))
                        .unwrap_or(false)
                })
                .count();

            let today = runtime::now_local().date();
            let activity = (0..7)
                .rev()
                .map(|offset| {
                    let day = today - Duration::days(offset);
                    let received = receipts
                        .iter()
                        .filter(|r| r.receipt_date.date() == day)
                        .count();
                    let issued = issues
                        .iter()
                        .filter(|i| i.issue_date.date() == day)
                        .count();
                    (day_label(day), received, issued)
                })
                .collect();

            set_stats.set(DashboardStats {
                product_count: products.iter().filter(|p| p.active).count(),
                open_batch_count: batches
                    .iter()
                    .filter(|b| b.remaining_quantity > 0.0)
                    .count(),
                low_stock_count,
                slow_moving_count,
                activity,
            });
            set_loading.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Tổng quan kho"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Tải lại"}
                    </button>
                </div>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <p>{"Đang tải..."}</p> }>
                <div class="stat-grid">
                    <StatCard
                        title="Sản phẩm đang bán"
                        icon_name="products"
                        value=Signal::derive(move || stats.get().product_count.to_string())
                    />
                    <StatCard
                        title="Lô hàng còn tồn"
                        icon_name="batches"
                        value=Signal::derive(move || stats.get().open_batch_count.to_string())
                    />
                    <StatCard
                        title="Sản phẩm dưới mức tồn"
                        icon_name="locations"
                        value=Signal::derive(move || stats.get().low_stock_count.to_string())
                    />
                    <StatCard
                        title="Lô chậm luân chuyển"
                        icon_name="adjustment"
                        value=Signal::derive(move || stats.get().slow_moving_count.to_string())
                    />
                </div>

                <div class="chart-card">
                    <h3>{"Nhập / xuất kho 7 ngày gần nhất"}</h3>
                    {move || {
                        let activity = stats.get().activity;
                        let max = activity
                            .iter()
                            .map(|(_, r, i)| (*r).max(*i))
                            .max()
                            .unwrap_or(0)
                            .max(1) as f64;
                        let bar_width = 18.0;
                        let group_width = 56.0;
                        let height = 160.0;
                        view! {
                            <svg
                                width=format!("{}", group_width * activity.len() as f64)
                                height=format!("{}", height + 24.0)
                                role="img"
                            >
                                {activity.iter().enumerate().map(|(idx, (label, received, issued))| {
                                    let x = idx as f64 * group_width;
                                    let received_h = height * (*received as f64) / max;
                                    let issued_h = height * (*issued as f64) / max;
                                    view! {
                                        <g>
                                            <rect
                                                x=format!("{}", x + 6.0)
                                                y=format!("{}", height - received_h)
                                                width=format!("{}", bar_width)
                                                height=format!("{}", received_h)
                                                class="chart-bar chart-bar--receipt"
                                            />
                                            <rect
                                                x=format!("{}", x + 6.0 + bar_width + 4.0)
                                                y=format!("{}", height - issued_h)
                                                width=format!("{}", bar_width)
                                                height=format!("{}", issued_h)
                                                class="chart-bar chart-bar--issue"
                                            />
                                            <text
                                                x=format!("{}", x + group_width / 2.0)
                                                y=format!("{}", height + 16.0)
                                                text-anchor="middle"
                                                class="chart-label"
                                            >
                                                {label.clone()}
                                            </text>
                                        </g>
                                    }
                                }).collect_view()}
                            </svg>
                            <div class="chart-legend">
                                <span class="chart-legend__item chart-legend__item--receipt">{"Phiếu nhập"}</span>
                                <span class="chart-legend__item chart-legend__item--issue">{"Phiếu xuất"}</span>
                            </div>
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}
