//! Page registry: every screen reachable from the top navigation, with its
//! label, icon and admin gating in one table.

use leptos::prelude::*;

use crate::dashboards::home::DashboardPage;
use crate::domain::adjustment::ui::list::AdjustmentList;
use crate::domain::batch::ui::list::InventoryBatchList;
use crate::domain::category::ui::list::CategoryList;
use crate::domain::goods_issue::ui::list::GoodsIssueList;
use crate::domain::goods_receipt::ui::list::GoodsReceiptList;
use crate::domain::location::ui::list::LocationList;
use crate::domain::partner::ui::list::PartnerList;
use crate::domain::product::ui::list::ProductList;
use crate::system::users::ui::list::UserList;
use contracts::domain::partner::PartnerType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Dashboard,
    Products,
    Categories,
    Suppliers,
    Customers,
    Locations,
    Batches,
    GoodsReceipt,
    GoodsIssue,
    Adjustment,
    Users,
}

impl PageKey {
    pub fn key(&self) -> &'static str {
        match self {
            PageKey::Dashboard => "dashboard",
            PageKey::Products => "products",
            PageKey::Categories => "categories",
            PageKey::Suppliers => "suppliers",
            PageKey::Customers => "customers",
            PageKey::Locations => "locations",
            PageKey::Batches => "batches",
            PageKey::GoodsReceipt => "receipt",
            PageKey::GoodsIssue => "issue",
            PageKey::Adjustment => "adjustment",
            PageKey::Users => "users",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "dashboard" => PageKey::Dashboard,
            "products" => PageKey::Products,
            "categories" => PageKey::Categories,
            "suppliers" => PageKey::Suppliers,
            "customers" => PageKey::Customers,
            "locations" => PageKey::Locations,
            "batches" => PageKey::Batches,
            "receipt" => PageKey::GoodsReceipt,
            "issue" => PageKey::GoodsIssue,
            "adjustment" => PageKey::Adjustment,
            "users" => PageKey::Users,
            _ => return None,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageKey::Dashboard => "Trang chủ",
            PageKey::Products => "Sản phẩm",
            PageKey::Categories => "Danh mục",
            PageKey::Suppliers => "Nhà cung cấp",
            PageKey::Customers => "Khách hàng",
            PageKey::Locations => "Vị trí kho",
            PageKey::Batches => "Lô hàng tồn",
            PageKey::GoodsReceipt => "Phiếu nhập kho",
            PageKey::GoodsIssue => "Phiếu xuất kho",
            PageKey::Adjustment => "Điều chỉnh tồn kho",
            PageKey::Users => "Người dùng",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            PageKey::Dashboard => "dashboard",
            PageKey::Products => "products",
            PageKey::Categories => "categories",
            PageKey::Suppliers => "suppliers",
            PageKey::Customers => "customers",
            PageKey::Locations => "locations",
            PageKey::Batches => "batches",
            PageKey::GoodsReceipt => "receipt",
            PageKey::GoodsIssue => "issue",
            PageKey::Adjustment => "adjustment",
            PageKey::Users => "users",
        }
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, PageKey::Users)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub items: Vec<PageKey>,
    pub admin_only: bool,
}

pub fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "catalog",
            label: "Sản phẩm & Danh mục",
            items: vec![PageKey::Products, PageKey::Categories],
            admin_only: false,
        },
        MenuGroup {
            id: "partners",
            label: "Đối tác",
            items: vec![PageKey::Suppliers, PageKey::Customers],
            admin_only: false,
        },
        MenuGroup {
            id: "warehouse",
            label: "Kho",
            items: vec![PageKey::Locations, PageKey::Batches],
            admin_only: false,
        },
        MenuGroup {
            id: "transactions",
            label: "Nhập / Xuất / Kiểm kê",
            items: vec![
                PageKey::GoodsReceipt,
                PageKey::GoodsIssue,
                PageKey::Adjustment,
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "admin",
            label: "Quản trị",
            items: vec![PageKey::Users],
            admin_only: true,
        },
    ]
}

pub fn render_page(key: PageKey) -> AnyView {
    match key {
        PageKey::Dashboard => view! { <DashboardPage /> }.into_any(),
        PageKey::Products => view! { <ProductList /> }.into_any(),
        PageKey::Categories => view! { <CategoryList /> }.into_any(),
        PageKey::Suppliers => {
            view! { <PartnerList partner_type=PartnerType::Supplier /> }.into_any()
        }
        PageKey::Customers => {
            view! { <PartnerList partner_type=PartnerType::Customer /> }.into_any()
        }
        PageKey::Locations => view! { <LocationList /> }.into_any(),
        PageKey::Batches => view! { <InventoryBatchList /> }.into_any(),
        PageKey::GoodsReceipt => view! { <GoodsReceiptList /> }.into_any(),
        PageKey::GoodsIssue => view! { <GoodsIssueList /> }.into_any(),
        PageKey::Adjustment => view! { <AdjustmentList /> }.into_any(),
        PageKey::Users => view! { <UserList /> }.into_any(),
    }
}
