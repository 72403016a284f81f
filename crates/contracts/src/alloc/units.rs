use thiserror::Error;

use crate::domain::product::UnitConversion;

/// Tolerance for float drift when comparing accumulated base quantities
/// against a batch's remaining quantity.
pub const EPSILON: f64 = 1e-6;

/// Decimal-place limit for entered quantities. Receipts historically accept
/// finer granularity than issues; the difference is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityPrecision {
    /// Inbound lines: up to 3 decimal places.
    Receipt,
    /// Outbound lines: up to 2 decimal places.
    Issue,
}

impl QuantityPrecision {
    pub fn max_decimals(&self) -> u32 {
        match self {
            QuantityPrecision::Receipt => 3,
            QuantityPrecision::Issue => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("Số lượng phải lớn hơn 0")]
    NotPositive,
    #[error("Đơn vị \"{unit}\" chỉ nhận số lượng nguyên")]
    FractionNotAllowed { unit: String },
    #[error("Số lượng chỉ được tối đa {max_decimals} chữ số thập phân")]
    TooManyDecimals { max_decimals: u32 },
}

/// Base-unit equivalent of a quantity expressed in a conversion unit.
pub fn normalize(quantity: f64, ratio_to_base: f64) -> f64 {
    quantity * ratio_to_base
}

/// Maximum quantity orderable in a unit given the batch's remaining base
/// quantity, truncated (not rounded) to two decimal places so the displayed
/// maximum never exceeds what the batch can actually satisfy.
pub fn max_orderable(remaining_base: f64, ratio_to_base: f64) -> f64 {
    ((remaining_base / ratio_to_base) * 100.0).floor() / 100.0
}

/// Validate a quantity entered in `unit` against the positivity, whole-number
/// and decimal-place rules. Runs before any ledger mutation.
pub fn validate_quantity(
    quantity: f64,
    unit: &UnitConversion,
    precision: QuantityPrecision,
) -> Result<(), NormalizeError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(NormalizeError::NotPositive);
    }
    if !unit.allow_fractional && (quantity - quantity.round()).abs() > EPSILON {
        return Err(NormalizeError::FractionNotAllowed {
            unit: unit.unit_name.clone(),
        });
    }
    let max_decimals = precision.max_decimals();
    let scale = 10f64.powi(max_decimals as i32);
    if (quantity * scale - (quantity * scale).round()).abs() > EPSILON * scale {
        return Err(NormalizeError::TooManyDecimals { max_decimals });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, ratio: f64, fractional: bool) -> UnitConversion {
        UnitConversion {
            id: None,
            unit_name: name.into(),
            ratio_to_base: ratio,
            allow_fractional: fractional,
        }
    }

    #[test]
    fn normalize_is_plain_multiplication() {
        assert_eq!(normalize(2.0, 10.0), 20.0);
        assert_eq!(normalize(0.5, 24.0), 12.0);
    }

    #[test]
    fn max_orderable_truncates_to_two_decimals() {
        // 25 kg remaining, box of 10 kg -> 2.5 boxes
        assert_eq!(max_orderable(25.0, 10.0), 2.5);
        // 10 kg remaining, pack of 3 kg -> 3.333... -> 3.33, never 3.34
        assert_eq!(max_orderable(10.0, 3.0), 3.33);
        assert_eq!(max_orderable(0.0, 5.0), 0.0);
    }

    #[test]
    fn rejects_non_positive_quantities() {
        let u = unit("kg", 1.0, true);
        assert_eq!(
            validate_quantity(0.0, &u, QuantityPrecision::Issue),
            Err(NormalizeError::NotPositive)
        );
        assert_eq!(
            validate_quantity(-3.0, &u, QuantityPrecision::Receipt),
            Err(NormalizeError::NotPositive)
        );
        assert_eq!(
            validate_quantity(f64::NAN, &u, QuantityPrecision::Issue),
            Err(NormalizeError::NotPositive)
        );
    }

    #[test]
    fn whole_number_units_reject_fractions() {
        let boxes = unit("thùng", 10.0, false);
        assert!(validate_quantity(2.0, &boxes, QuantityPrecision::Issue).is_ok());
        assert_eq!(
            validate_quantity(2.5, &boxes, QuantityPrecision::Issue),
            Err(NormalizeError::FractionNotAllowed {
                unit: "thùng".into()
            })
        );
    }

    #[test]
    fn precision_differs_by_document_type() {
        let kg = unit("kg", 1.0, true);
        // three decimals allowed on receipts, not on issues
        assert!(validate_quantity(0.125, &kg, QuantityPrecision::Receipt).is_ok());
        assert_eq!(
            validate_quantity(0.125, &kg, QuantityPrecision::Issue),
            Err(NormalizeError::TooManyDecimals { max_decimals: 2 })
        );
        assert!(validate_quantity(0.12, &kg, QuantityPrecision::Issue).is_ok());
    }
}
