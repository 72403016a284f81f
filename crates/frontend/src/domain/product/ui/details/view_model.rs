use contracts::domain::category::Category;
use contracts::domain::product::{ProductDto, UnitConversion};
use leptos::prelude::*;
use std::rc::Rc;
use uuid::Uuid;

use crate::domain::category::api as category_api;
use crate::domain::product::api;

/// ViewModel for the product form, including the unit-conversion sub-list.
#[derive(Clone)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductDto>,
    pub categories: RwSignal<Vec<Category>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductDto {
                min_stock_level: 0.0,
                slow_moving_threshold: 90,
                ..ProductDto::default()
            }),
            categories: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    /// Active categories for the select box.
    pub fn load_categories(&self) {
        let categories = self.categories;
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(list) = category_api::fetch_all().await {
                categories.set(list.into_iter().filter(|c| c.active).collect());
            }
        });
    }

    /// Load form data from the server if an id was given. The base-unit
    /// conversion row (ratio 1) stays out of the editable sub-list; only
    /// user-defined units are shown.
    pub fn load_if_needed(&self, id: Option<Uuid>) {
        let Some(existing_id) = id else { return };
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_id(existing_id).await {
                Ok(product) => {
                    form.set(ProductDto {
                        id: Some(product.id),
                        sku: product.sku,
                        name: product.name,
                        base_unit: product.base_unit,
                        category_id: product.category_id,
                        min_stock_level: product.min_stock_level,
                        slow_moving_threshold: product.slow_moving_threshold,
                        conversions: product
                            .conversions
                            .into_iter()
                            .filter(|c| !c.is_base())
                            .collect(),
                    });
                }
                Err(e) => error.set(Some(format!("Lỗi tải sản phẩm: {}", e))),
            }
        });
    }

    /// Append an empty conversion row (id stays None so the backend treats
    /// it as an insert).
    pub fn add_conversion(&self) {
        self.form.update(|f| {
            f.conversions.push(UnitConversion {
                id: None,
                unit_name: String::new(),
                ratio_to_base: 0.0,
                allow_fractional: true,
            });
        });
    }

    pub fn remove_conversion(&self, index: usize) {
        self.form.update(|f| {
            if index < f.conversions.len() {
                f.conversions.remove(index);
            }
        });
    }

    pub fn update_conversion(&self, index: usize, update: impl FnOnce(&mut UnitConversion)) {
        self.form.update(|f| {
            if let Some(conv) = f.conversions.get_mut(index) {
                update(conv);
            }
        });
    }

    /// Validate, then create or update.
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let dto = self.form.get();
        if let Err(message) = dto.validate() {
            self.error.set(Some(message));
            return;
        }
        if dto.category_id.is_none() {
            self.error.set(Some("Vui lòng chọn danh mục".to_string()));
            return;
        }

        let error = self.error;
        let saving = self.saving;
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match dto.id {
                Some(existing) => api::update(existing, &dto).await,
                None => api::create(&dto).await,
            };
            saving.set(false);
            match result {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
