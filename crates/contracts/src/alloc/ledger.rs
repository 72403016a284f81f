use thiserror::Error;
use uuid::Uuid;

use crate::alloc::units::{
    self, max_orderable, normalize, NormalizeError, QuantityPrecision, EPSILON,
};
use crate::domain::product::UnitConversion;

/// How `add` treats a line that collides with one already in the ledger.
///
/// Receipt entry treats repeats as additive (`Merge`); issue batch selection
/// forbids picking the same batch twice (`Reject`). The policy is declared
/// per call site instead of living implicitly in two divergent handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Same (batch, unit) merges by summing quantities.
    Merge,
    /// Any second pick of the same batch is refused outright.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Lô hàng {batch_code} đã được chọn")]
    AlreadyAdded { batch_code: String },
    #[error("Lô {batch_code} vượt quá tồn kho, thiếu {shortfall} đơn vị cơ bản")]
    ExceedsRemaining { batch_code: String, shortfall: f64 },
    #[error("Đơn vị \"{unit}\" đã được dùng cho lô {batch_code}")]
    DuplicateUnit { batch_code: String, unit: String },
    #[error("Dòng không tồn tại")]
    UnknownLine,
    #[error(transparent)]
    Invalid(#[from] NormalizeError),
}

/// One chosen (batch, unit, quantity) triple in the working set.
///
/// Outbound lines reference an existing batch and carry its remaining base
/// quantity as `remaining_snapshot`; inbound receipt lines target a lot that
/// does not exist yet, so callers scope them by product id (`batch_id`) and
/// leave the snapshot `None` (uncapped).
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationLine {
    pub key: u64,
    pub batch_id: Uuid,
    pub batch_code: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
    pub unit: UnitConversion,
    pub quantity: f64,
    pub remaining_snapshot: Option<f64>,
    pub unit_price: Option<f64>,
}

impl AllocationLine {
    pub fn base_quantity(&self) -> f64 {
        normalize(self.quantity, self.unit.ratio_to_base)
    }

    pub fn amount(&self) -> f64 {
        self.unit_price.map(|p| self.quantity * p).unwrap_or(0.0)
    }

    /// Maximum quantity this line may hold in its current unit.
    pub fn max_quantity(&self) -> Option<f64> {
        self.remaining_snapshot
            .map(|remaining| max_orderable(remaining, self.unit.ratio_to_base))
    }
}

/// Parameters for a line about to be added; the ledger assigns the key.
#[derive(Debug, Clone)]
pub struct NewLine {
    pub batch_id: Uuid,
    pub batch_code: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
    pub unit: UnitConversion,
    pub quantity: f64,
    pub remaining_snapshot: Option<f64>,
    pub unit_price: Option<f64>,
}

/// Session-scoped working set for one in-progress document. Every mutation
/// is check-then-apply: a rejected operation leaves the ledger unchanged.
#[derive(Debug, Clone)]
pub struct AllocationLedger {
    lines: Vec<AllocationLine>,
    precision: QuantityPrecision,
    next_key: u64,
}

impl AllocationLedger {
    pub fn new(precision: QuantityPrecision) -> Self {
        Self {
            lines: Vec::new(),
            precision,
            next_key: 1,
        }
    }

    pub fn lines(&self) -> &[AllocationLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Combined base quantity currently drawn from one batch, optionally
    /// ignoring one line (used when re-validating that line's own change).
    fn drawn_from(&self, batch_id: Uuid, excluding: Option<u64>) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.batch_id == batch_id && Some(l.key) != excluding)
            .map(|l| l.base_quantity())
            .sum()
    }

    /// The oversubscription invariant: with `candidate_base` more base units
    /// drawn from `batch_id`, does the batch stay within its snapshot?
    fn check_cap(
        &self,
        batch_id: Uuid,
        batch_code: &str,
        remaining: Option<f64>,
        candidate_base: f64,
        excluding: Option<u64>,
    ) -> Result<(), LedgerError> {
        let Some(remaining) = remaining else {
            return Ok(());
        };
        let total = self.drawn_from(batch_id, excluding) + candidate_base;
        if total > remaining + EPSILON {
            return Err(LedgerError::ExceedsRemaining {
                batch_code: batch_code.to_string(),
                shortfall: total - remaining,
            });
        }
        Ok(())
    }

    /// Add a line, merging or rejecting per `policy`. Returns the key of the
    /// line that now holds the quantity.
    pub fn add(&mut self, line: NewLine, policy: DuplicatePolicy) -> Result<u64, LedgerError> {
        units::validate_quantity(line.quantity, &line.unit, self.precision)?;

        match policy {
            DuplicatePolicy::Reject => {
                if self.lines.iter().any(|l| l.batch_id == line.batch_id) {
                    return Err(LedgerError::AlreadyAdded {
                        batch_code: line.batch_code,
                    });
                }
            }
            DuplicatePolicy::Merge => {
                let same_unit = |a: &UnitConversion, b: &UnitConversion| match (a.id, b.id) {
                    (Some(x), Some(y)) => x == y,
                    _ => a.unit_name.eq_ignore_ascii_case(&b.unit_name),
                };
                if let Some(existing_key) = self
                    .lines
                    .iter()
                    .find(|l| l.batch_id == line.batch_id && same_unit(&l.unit, &line.unit))
                    .map(|l| l.key)
                {
                    let existing = self
                        .lines
                        .iter()
                        .find(|l| l.key == existing_key)
                        .cloned()
                        .ok_or(LedgerError::UnknownLine)?;
                    let merged = existing.quantity + line.quantity;
                    units::validate_quantity(merged, &existing.unit, self.precision)?;
                    self.check_cap(
                        line.batch_id,
                        &line.batch_code,
                        line.remaining_snapshot.or(existing.remaining_snapshot),
                        normalize(merged, existing.unit.ratio_to_base),
                        Some(existing_key),
                    )?;
                    let target = self
                        .lines
                        .iter_mut()
                        .find(|l| l.key == existing_key)
                        .ok_or(LedgerError::UnknownLine)?;
                    target.quantity = merged;
                    return Ok(existing_key);
                }
            }
        }

        self.check_cap(
            line.batch_id,
            &line.batch_code,
            line.remaining_snapshot,
            normalize(line.quantity, line.unit.ratio_to_base),
            None,
        )?;

        let key = self.next_key;
        self.next_key += 1;
        self.lines.push(AllocationLine {
            key,
            batch_id: line.batch_id,
            batch_code: line.batch_code,
            product_id: line.product_id,
            product_name: line.product_name,
            location_id: line.location_id,
            location_name: line.location_name,
            unit: line.unit,
            quantity: line.quantity,
            remaining_snapshot: line.remaining_snapshot,
            unit_price: line.unit_price,
        });
        Ok(key)
    }

    pub fn remove(&mut self, key: u64) -> Result<AllocationLine, LedgerError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.key == key)
            .ok_or(LedgerError::UnknownLine)?;
        Ok(self.lines.remove(idx))
    }

    /// Switch a line to another unit. Refused when another line for the same
    /// batch already uses that unit (a hidden duplicate). If the current
    /// quantity no longer fits under the batch cap in the new unit, it is
    /// clamped to the new maximum.
    pub fn change_unit(&mut self, key: u64, new_unit: UnitConversion) -> Result<(), LedgerError> {
        let line = self
            .lines
            .iter()
            .find(|l| l.key == key)
            .cloned()
            .ok_or(LedgerError::UnknownLine)?;

        let clashes = self.lines.iter().any(|l| {
            l.key != key
                && l.batch_id == line.batch_id
                && l.product_id == line.product_id
                && l.unit.unit_name.eq_ignore_ascii_case(&new_unit.unit_name)
        });
        if clashes {
            return Err(LedgerError::DuplicateUnit {
                batch_code: line.batch_code.clone(),
                unit: new_unit.unit_name,
            });
        }

        let mut quantity = line.quantity;
        units::validate_quantity(quantity, &new_unit, self.precision)
            .or_else(|_| -> Result<(), LedgerError> {
                // e.g. 2.5 carried into a whole-number unit: fall back to 1
                quantity = 1.0;
                Ok(())
            })?;

        if self
            .check_cap(
                line.batch_id,
                &line.batch_code,
                line.remaining_snapshot,
                normalize(quantity, new_unit.ratio_to_base),
                Some(key),
            )
            .is_err()
        {
            let available = line
                .remaining_snapshot
                .map(|r| r - self.drawn_from(line.batch_id, Some(key)))
                .unwrap_or(0.0);
            quantity = max_orderable(available, new_unit.ratio_to_base);
            if quantity <= 0.0 {
                return Err(LedgerError::ExceedsRemaining {
                    batch_code: line.batch_code,
                    shortfall: normalize(1.0, new_unit.ratio_to_base) - available,
                });
            }
            if !new_unit.allow_fractional {
                quantity = quantity.floor();
                if quantity <= 0.0 {
                    return Err(LedgerError::ExceedsRemaining {
                        batch_code: line.batch_code,
                        shortfall: normalize(1.0, new_unit.ratio_to_base) - available,
                    });
                }
            }
        }

        let target = self
            .lines
            .iter_mut()
            .find(|l| l.key == key)
            .ok_or(LedgerError::UnknownLine)?;
        target.unit = new_unit;
        target.quantity = quantity;
        Ok(())
    }

    /// Set a line's quantity. Non-positive input is a surfaced validation
    /// error, not a silent no-op.
    pub fn change_quantity(&mut self, key: u64, quantity: f64) -> Result<(), LedgerError> {
        let line = self
            .lines
            .iter()
            .find(|l| l.key == key)
            .cloned()
            .ok_or(LedgerError::UnknownLine)?;
        units::validate_quantity(quantity, &line.unit, self.precision)?;
        self.check_cap(
            line.batch_id,
            &line.batch_code,
            line.remaining_snapshot,
            normalize(quantity, line.unit.ratio_to_base),
            Some(key),
        )?;
        let target = self
            .lines
            .iter_mut()
            .find(|l| l.key == key)
            .ok_or(LedgerError::UnknownLine)?;
        target.quantity = quantity;
        Ok(())
    }

    pub fn change_unit_price(&mut self, key: u64, unit_price: f64) -> Result<(), LedgerError> {
        if unit_price < 0.0 {
            return Err(NormalizeError::NotPositive.into());
        }
        let target = self
            .lines
            .iter_mut()
            .find(|l| l.key == key)
            .ok_or(LedgerError::UnknownLine)?;
        target.unit_price = Some(unit_price);
        Ok(())
    }

    pub fn change_location(
        &mut self,
        key: u64,
        location_id: Uuid,
        location_name: Option<String>,
    ) -> Result<(), LedgerError> {
        let target = self
            .lines
            .iter_mut()
            .find(|l| l.key == key)
            .ok_or(LedgerError::UnknownLine)?;
        target.location_id = Some(location_id);
        target.location_name = location_name;
        Ok(())
    }

    /// Sum of base quantities across all lines.
    pub fn total_base_quantity(&self) -> f64 {
        self.lines.iter().map(|l| l.base_quantity()).sum()
    }

    /// Monetary total over priced lines.
    pub fn total_amount(&self) -> f64 {
        self.lines.iter().map(|l| l.amount()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, ratio: f64, fractional: bool) -> UnitConversion {
        UnitConversion {
            id: Some(Uuid::new_v4()),
            unit_name: name.into(),
            ratio_to_base: ratio,
            allow_fractional: fractional,
        }
    }

    fn issue_line(batch_id: Uuid, remaining: f64, unit: UnitConversion, qty: f64) -> NewLine {
        NewLine {
            batch_id,
            batch_code: "B1".into(),
            product_id: Uuid::new_v4(),
            product_name: "Gạo".into(),
            location_id: None,
            location_name: Some("Kho A".into()),
            unit,
            quantity: qty,
            remaining_snapshot: Some(remaining),
            unit_price: None,
        }
    }

    /// Invariant check used after every mutation in these tests.
    fn assert_within_caps(ledger: &AllocationLedger) {
        let mut batches: Vec<Uuid> = ledger.lines().iter().map(|l| l.batch_id).collect();
        batches.sort();
        batches.dedup();
        for batch in batches {
            let remaining = ledger
                .lines()
                .iter()
                .find(|l| l.batch_id == batch)
                .and_then(|l| l.remaining_snapshot);
            if let Some(remaining) = remaining {
                let drawn: f64 = ledger
                    .lines()
                    .iter()
                    .filter(|l| l.batch_id == batch)
                    .map(|l| l.base_quantity())
                    .sum();
                assert!(drawn <= remaining + EPSILON, "batch oversubscribed");
            }
        }
    }

    // Scenario: base unit kg, conversion box -> 10 kg (whole boxes only),
    // batch with 25 kg remaining. Two boxes fit, three do not.
    #[test]
    fn box_allocation_respects_remaining() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let boxes = unit("box", 10.0, false);
        let batch = Uuid::new_v4();

        let key = ledger
            .add(issue_line(batch, 25.0, boxes, 2.0), DuplicatePolicy::Reject)
            .unwrap();
        assert_eq!(ledger.total_base_quantity(), 20.0);
        assert_within_caps(&ledger);

        let err = ledger.change_quantity(key, 3.0).unwrap_err();
        match err {
            LedgerError::ExceedsRemaining { batch_code, shortfall } => {
                assert_eq!(batch_code, "B1");
                assert!((shortfall - 5.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // rejected change left the ledger untouched
        assert_eq!(ledger.lines()[0].quantity, 2.0);
        assert_within_caps(&ledger);
    }

    #[test]
    fn reject_policy_refuses_second_pick_of_same_batch() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let batch = Uuid::new_v4();
        ledger
            .add(
                issue_line(batch, 100.0, unit("kg", 1.0, true), 5.0),
                DuplicatePolicy::Reject,
            )
            .unwrap();

        let err = ledger
            .add(
                issue_line(batch, 100.0, unit("box", 10.0, false), 1.0),
                DuplicatePolicy::Reject,
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyAdded { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn merge_policy_sums_quantities_for_same_unit() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Receipt);
        let batch = Uuid::new_v4();
        let kg = unit("kg", 1.0, true);

        let k1 = ledger
            .add(issue_line(batch, 100.0, kg.clone(), 10.0), DuplicatePolicy::Merge)
            .unwrap();
        let k2 = ledger
            .add(issue_line(batch, 100.0, kg, 5.5), DuplicatePolicy::Merge)
            .unwrap();
        assert_eq!(k1, k2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].quantity, 15.5);
        assert_within_caps(&ledger);
    }

    #[test]
    fn merge_still_enforces_cap_across_lines() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Receipt);
        let batch = Uuid::new_v4();
        let kg = unit("kg", 1.0, true);

        ledger
            .add(issue_line(batch, 20.0, kg.clone(), 15.0), DuplicatePolicy::Merge)
            .unwrap();
        let err = ledger
            .add(issue_line(batch, 20.0, kg, 6.0), DuplicatePolicy::Merge)
            .unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsRemaining { .. }));
        // failed merge must not have altered the existing line
        assert_eq!(ledger.lines()[0].quantity, 15.0);
    }

    #[test]
    fn cap_spans_multiple_lines_of_one_batch() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let batch = Uuid::new_v4();

        ledger
            .add(
                issue_line(batch, 25.0, unit("kg", 1.0, true), 8.0),
                DuplicatePolicy::Merge,
            )
            .unwrap();
        // a second line in boxes draws from the same 25 kg
        let err = ledger
            .add(
                issue_line(batch, 25.0, unit("box", 10.0, false), 2.0),
                DuplicatePolicy::Merge,
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsRemaining { .. }));

        ledger
            .add(
                issue_line(batch, 25.0, unit("box", 10.0, false), 1.0),
                DuplicatePolicy::Merge,
            )
            .unwrap();
        assert_eq!(ledger.total_base_quantity(), 18.0);
        assert_within_caps(&ledger);
    }

    #[test]
    fn non_positive_quantity_change_is_surfaced() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let batch = Uuid::new_v4();
        let key = ledger
            .add(
                issue_line(batch, 10.0, unit("kg", 1.0, true), 2.0),
                DuplicatePolicy::Reject,
            )
            .unwrap();

        assert_eq!(
            ledger.change_quantity(key, 0.0),
            Err(LedgerError::Invalid(NormalizeError::NotPositive))
        );
        assert_eq!(
            ledger.change_quantity(key, -1.0),
            Err(LedgerError::Invalid(NormalizeError::NotPositive))
        );
        assert_eq!(ledger.lines()[0].quantity, 2.0);
    }

    #[test]
    fn change_unit_refuses_hidden_duplicate() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let batch = Uuid::new_v4();
        let product = Uuid::new_v4();
        let mut l1 = issue_line(batch, 100.0, unit("kg", 1.0, true), 5.0);
        l1.product_id = product;
        let mut l2 = issue_line(batch, 100.0, unit("box", 10.0, false), 1.0);
        l2.product_id = product;

        ledger.add(l1, DuplicatePolicy::Merge).unwrap();
        let k2 = ledger.add(l2, DuplicatePolicy::Merge).unwrap();

        let err = ledger.change_unit(k2, unit("KG", 1.0, true)).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateUnit { .. }));
    }

    #[test]
    fn change_unit_clamps_to_new_cap() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let batch = Uuid::new_v4();
        let key = ledger
            .add(
                issue_line(batch, 25.0, unit("kg", 1.0, true), 24.0),
                DuplicatePolicy::Reject,
            )
            .unwrap();

        // 24 boxes of 10 kg would need 240 kg; clamp to what 25 kg allows
        ledger.change_unit(key, unit("box", 10.0, false)).unwrap();
        let line = &ledger.lines()[0];
        assert_eq!(line.unit.unit_name, "box");
        assert_eq!(line.quantity, 2.0);
        assert_within_caps(&ledger);
    }

    #[test]
    fn uncapped_inbound_lines_accumulate_freely() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Receipt);
        let product = Uuid::new_v4();
        let mut line = issue_line(product, 0.0, unit("kg", 1.0, true), 500.0);
        line.remaining_snapshot = None;
        line.unit_price = Some(12_000.0);
        ledger.add(line, DuplicatePolicy::Merge).unwrap();
        assert_eq!(ledger.total_base_quantity(), 500.0);
        assert_eq!(ledger.total_amount(), 6_000_000.0);
    }

    #[test]
    fn remove_then_read_totals() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        let b1 = Uuid::new_v4();
        let b2 = Uuid::new_v4();
        let k1 = ledger
            .add(
                issue_line(b1, 50.0, unit("kg", 1.0, true), 10.0),
                DuplicatePolicy::Reject,
            )
            .unwrap();
        ledger
            .add(
                issue_line(b2, 50.0, unit("kg", 1.0, true), 20.0),
                DuplicatePolicy::Reject,
            )
            .unwrap();

        ledger.remove(k1).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_base_quantity(), 20.0);
        assert_eq!(ledger.remove(k1), Err(LedgerError::UnknownLine));
    }
}
