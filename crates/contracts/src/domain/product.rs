use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit-of-measure conversion belonging to a product.
///
/// `id` is `None` for rows the user just added in the form; the backend uses
/// the presence of the id to distinguish updates from inserts when the
/// product is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConversion {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub unit_name: String,
    pub ratio_to_base: f64,
    /// When false, quantities entered in this unit must be whole numbers.
    #[serde(default = "default_allow_fractional")]
    pub allow_fractional: bool,
}

fn default_allow_fractional() -> bool {
    true
}

impl UnitConversion {
    pub fn is_base(&self) -> bool {
        self.ratio_to_base == 1.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub base_unit: String,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub min_stock_level: f64,
    /// Days a batch may sit unconsumed before it is flagged slow-moving.
    pub slow_moving_threshold: u32,
    pub active: bool,
    #[serde(default)]
    pub conversions: Vec<UnitConversion>,
}

impl Product {
    /// The conversion row representing the base unit (ratio 1), if the
    /// backend materialized one.
    pub fn base_conversion(&self) -> Option<&UnitConversion> {
        self.conversions.iter().find(|c| c.is_base())
    }

    /// All units the product can be transacted in: the base unit first,
    /// then every non-base conversion.
    pub fn selectable_units(&self) -> Vec<UnitConversion> {
        let mut units = Vec::with_capacity(self.conversions.len() + 1);
        units.push(UnitConversion {
            id: self.base_conversion().and_then(|c| c.id),
            unit_name: self.base_unit.clone(),
            ratio_to_base: 1.0,
            allow_fractional: self
                .base_conversion()
                .map(|c| c.allow_fractional)
                .unwrap_or(true),
        });
        units.extend(self.conversions.iter().filter(|c| !c.is_base()).cloned());
        units
    }
}

/// Form payload for create/update. Conversions are sent as entered, ids
/// included, so the backend can reconcile the sub-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub sku: String,
    pub name: String,
    pub base_unit: String,
    pub category_id: Option<Uuid>,
    pub min_stock_level: f64,
    pub slow_moving_threshold: u32,
    #[serde(default)]
    pub conversions: Vec<UnitConversion>,
}

impl ProductDto {
    /// Client-side validation mirroring the form rules: required fields,
    /// unit names unique case-insensitively (and distinct from the base
    /// unit), ratios positive and never exactly 1 (1 is the base unit's).
    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("Vui lòng nhập mã SKU".into());
        }
        if self.name.trim().is_empty() {
            return Err("Vui lòng nhập tên sản phẩm".into());
        }
        let base = self.base_unit.trim();
        if base.is_empty() {
            return Err("Vui lòng nhập đơn vị cơ bản".into());
        }
        if self.min_stock_level < 0.0 {
            return Err("Mức tồn tối thiểu phải là số không âm".into());
        }
        if self.slow_moving_threshold == 0 {
            return Err("Ngưỡng chậm luân chuyển phải là số ngày dương".into());
        }

        let base_lower = base.to_lowercase();
        let mut seen: Vec<String> = Vec::new();
        for conv in &self.conversions {
            let name = conv.unit_name.trim();
            if name.is_empty() {
                return Err("Tên đơn vị quy đổi không được để trống".into());
            }
            let lower = name.to_lowercase();
            if lower == base_lower {
                return Err("Tên đơn vị không được trùng với đơn vị cơ bản".into());
            }
            if seen.contains(&lower) {
                return Err(format!("Tên đơn vị \"{}\" đã tồn tại", name));
            }
            if conv.ratio_to_base <= 0.0 {
                return Err("Tỉ lệ quy đổi phải lớn hơn 0".into());
            }
            if conv.ratio_to_base == 1.0 {
                return Err("Tỉ lệ quy đổi phải khác 1".into());
            }
            seen.push(lower);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto_with(conversions: Vec<UnitConversion>) -> ProductDto {
        ProductDto {
            id: None,
            sku: "SP001".into(),
            name: "Gạo ST25".into(),
            base_unit: "kg".into(),
            category_id: None,
            min_stock_level: 10.0,
            slow_moving_threshold: 90,
            conversions,
        }
    }

    fn conv(name: &str, ratio: f64) -> UnitConversion {
        UnitConversion {
            id: None,
            unit_name: name.into(),
            ratio_to_base: ratio,
            allow_fractional: true,
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(dto_with(vec![conv("bao", 50.0), conv("thùng", 10.0)])
            .validate()
            .is_ok());
    }

    #[test]
    fn unit_name_clashing_with_base_rejected() {
        let err = dto_with(vec![conv("KG", 10.0)]).validate().unwrap_err();
        assert!(err.contains("đơn vị cơ bản"));
    }

    #[test]
    fn duplicate_unit_names_case_insensitive() {
        let err = dto_with(vec![conv("Thùng", 10.0), conv("thùng", 20.0)])
            .validate()
            .unwrap_err();
        assert!(err.contains("đã tồn tại"));
    }

    #[test]
    fn ratio_of_one_reserved_for_base() {
        assert!(dto_with(vec![conv("hộp", 1.0)]).validate().is_err());
        assert!(dto_with(vec![conv("hộp", 0.0)]).validate().is_err());
    }

    #[test]
    fn selectable_units_lead_with_base() {
        let product = Product {
            id: Uuid::new_v4(),
            sku: "SP001".into(),
            name: "Gạo".into(),
            base_unit: "kg".into(),
            category_id: None,
            category_name: None,
            min_stock_level: 0.0,
            slow_moving_threshold: 90,
            active: true,
            conversions: vec![conv("bao", 50.0)],
        };
        let units = product.selectable_units();
        assert_eq!(units[0].unit_name, "kg");
        assert_eq!(units[0].ratio_to_base, 1.0);
        assert_eq!(units[1].unit_name, "bao");
    }
}
