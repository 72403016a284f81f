use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::alloc::ledger::AllocationLedger;
use crate::domain::adjustment::{AdjustmentDetailPayload, AdjustmentPayload};
use crate::domain::goods_issue::{GoodsIssueDetailPayload, GoodsIssuePayload, IssueType};
use crate::domain::goods_receipt::{GoodsReceiptDetailPayload, GoodsReceiptPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Receipt,
    Issue,
    Adjustment,
}

impl DocumentKind {
    /// Two-letter code prefix: phiếu nhập / phiếu xuất / điều chỉnh.
    pub fn code_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Receipt => "PN",
            DocumentKind::Issue => "PX",
            DocumentKind::Adjustment => "DC",
        }
    }
}

/// Fallback document code: prefix + YYYYMMDD + 3-digit suffix. Collisions
/// are possible and not checked here; the backend owns uniqueness. Date and
/// suffix are supplied by the caller (the UI passes `js_sys::Date` /
/// `Math::random`), which keeps this pure.
pub fn generate_code(kind: DocumentKind, date: NaiveDate, suffix: u32) -> String {
    format!(
        "{}{}{:03}",
        kind.code_prefix(),
        date.format("%Y%m%d"),
        suffix % 1000
    )
}

/// Use the user-entered code when present, otherwise generate one.
pub fn resolve_code(raw: &str, kind: DocumentKind, date: NaiveDate, suffix: u32) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        generate_code(kind, date, suffix)
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    #[error("Vui lòng chọn ít nhất một dòng hàng")]
    EmptyDocument,
    #[error("Vui lòng chọn đối tác cho phiếu")]
    MissingCounterparty,
    #[error("Sản phẩm {product} chưa chọn vị trí kho")]
    MissingLocation { product: String },
    #[error("Sản phẩm {product} chưa có đơn giá hợp lệ")]
    MissingPrice { product: String },
    #[error("Còn {count} lô chưa nhập số lượng thực tế")]
    MissingActualQuantity { count: usize },
    #[error("Số lượng thực tế của lô {batch_code} không hợp lệ")]
    InvalidActualQuantity { batch_code: String },
}

#[derive(Debug, Clone)]
pub struct ReceiptHeader {
    pub code: String,
    pub date: NaiveDateTime,
    pub partner_id: Option<Uuid>,
    pub created_by_id: String,
    pub paid_amount: f64,
}

/// Build the goods-receipt payload from the ledger, or say exactly what is
/// missing before anything touches the network.
pub fn assemble_receipt(
    header: &ReceiptHeader,
    ledger: &AllocationLedger,
    code_suffix: u32,
) -> Result<GoodsReceiptPayload, AssembleError> {
    if ledger.is_empty() {
        return Err(AssembleError::EmptyDocument);
    }
    let partner_id = header.partner_id.ok_or(AssembleError::MissingCounterparty)?;

    let mut details = Vec::with_capacity(ledger.len());
    for line in ledger.lines() {
        let location_id = line.location_id.ok_or_else(|| AssembleError::MissingLocation {
            product: line.product_name.clone(),
        })?;
        let unit_price = match line.unit_price {
            Some(p) if p > 0.0 => p,
            _ => {
                return Err(AssembleError::MissingPrice {
                    product: line.product_name.clone(),
                })
            }
        };
        details.push(GoodsReceiptDetailPayload {
            product_id: line.product_id,
            location_id,
            unit_conversion_id: line.unit.id,
            quantity: line.quantity,
            unit_price,
        });
    }

    Ok(GoodsReceiptPayload {
        receipt_code: resolve_code(
            &header.code,
            DocumentKind::Receipt,
            header.date.date(),
            code_suffix,
        ),
        receipt_date: header.date,
        partner_id,
        created_by_id: header.created_by_id.clone(),
        paid_amount: header.paid_amount,
        total_amount: ledger.total_amount(),
        details,
    })
}

#[derive(Debug, Clone)]
pub struct IssueHeader {
    pub code: String,
    pub date: NaiveDateTime,
    pub issue_type: IssueType,
    pub customer_id: Option<Uuid>,
    pub created_by_id: String,
}

pub fn assemble_issue(
    header: &IssueHeader,
    ledger: &AllocationLedger,
    code_suffix: u32,
) -> Result<GoodsIssuePayload, AssembleError> {
    if ledger.is_empty() {
        return Err(AssembleError::EmptyDocument);
    }
    if header.issue_type.requires_customer() && header.customer_id.is_none() {
        return Err(AssembleError::MissingCounterparty);
    }

    let details = ledger
        .lines()
        .iter()
        .map(|line| GoodsIssueDetailPayload {
            product_id: line.product_id,
            inventory_batch_id: line.batch_id,
            unit_conversion_id: line.unit.id,
            quantity: line.quantity,
        })
        .collect();

    Ok(GoodsIssuePayload {
        issue_code: resolve_code(
            &header.code,
            DocumentKind::Issue,
            header.date.date(),
            code_suffix,
        ),
        issue_date: header.date,
        issue_type: header.issue_type,
        customer_id: header.customer_id.filter(|_| header.issue_type.requires_customer()),
        created_by_id: header.created_by_id.clone(),
        amount_paid: 0.0,
        details,
    })
}

/// One scanned batch awaiting its counted quantity in the adjustment editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CountLine {
    pub batch_id: Uuid,
    pub batch_code: String,
    pub product_name: String,
    pub location_name: String,
    pub system_quantity: f64,
    /// None until the user keys in the counted value.
    pub actual_quantity: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AdjustmentHeader {
    pub code: String,
    pub date: NaiveDateTime,
    pub created_by: String,
}

pub fn assemble_adjustment(
    header: &AdjustmentHeader,
    counts: &[CountLine],
    code_suffix: u32,
) -> Result<AdjustmentPayload, AssembleError> {
    if counts.is_empty() {
        return Err(AssembleError::EmptyDocument);
    }
    let missing = counts.iter().filter(|c| c.actual_quantity.is_none()).count();
    if missing > 0 {
        return Err(AssembleError::MissingActualQuantity { count: missing });
    }

    let mut details = Vec::with_capacity(counts.len());
    for count in counts {
        let actual = count.actual_quantity.unwrap_or_default();
        if !actual.is_finite() || actual < 0.0 {
            return Err(AssembleError::InvalidActualQuantity {
                batch_code: count.batch_code.clone(),
            });
        }
        details.push(AdjustmentDetailPayload {
            inventory_batch_id: count.batch_id,
            actual_quantity: actual,
        });
    }

    Ok(AdjustmentPayload {
        code: resolve_code(
            &header.code,
            DocumentKind::Adjustment,
            header.date.date(),
            code_suffix,
        ),
        adjust_date: header.date,
        created_by: header.created_by.clone(),
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::ledger::{DuplicatePolicy, NewLine};
    use crate::alloc::units::QuantityPrecision;
    use crate::domain::product::UnitConversion;

    fn unit(name: &str, ratio: f64) -> UnitConversion {
        UnitConversion {
            id: Some(Uuid::new_v4()),
            unit_name: name.into(),
            ratio_to_base: ratio,
            allow_fractional: true,
        }
    }

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn receipt_ledger() -> AllocationLedger {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Receipt);
        ledger
            .add(
                NewLine {
                    batch_id: Uuid::new_v4(),
                    batch_code: "SP001".into(),
                    product_id: Uuid::new_v4(),
                    product_name: "Gạo ST25".into(),
                    location_id: Some(Uuid::new_v4()),
                    location_name: Some("Kho A".into()),
                    unit: unit("bao", 50.0),
                    quantity: 4.0,
                    remaining_snapshot: None,
                    unit_price: Some(600_000.0),
                },
                DuplicatePolicy::Merge,
            )
            .unwrap();
        ledger
    }

    #[test]
    fn generated_code_matches_pattern() {
        let code = generate_code(
            DocumentKind::Receipt,
            NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            7,
        );
        assert_eq!(code, "PN20241105007");
        assert_eq!(code.len(), 2 + 8 + 3);
        assert!(code.starts_with("PN"));
        assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn user_entered_code_wins_over_generated() {
        let code = resolve_code(
            " PN0001 ",
            DocumentKind::Receipt,
            NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            123,
        );
        assert_eq!(code, "PN0001");
    }

    #[test]
    fn receipt_requires_partner_and_prices() {
        let ledger = receipt_ledger();
        let mut header = ReceiptHeader {
            code: String::new(),
            date: date(),
            partner_id: None,
            created_by_id: "u-1".into(),
            paid_amount: 0.0,
        };
        assert_eq!(
            assemble_receipt(&header, &ledger, 1).unwrap_err(),
            AssembleError::MissingCounterparty
        );

        header.partner_id = Some(Uuid::new_v4());
        let payload = assemble_receipt(&header, &ledger, 1).unwrap();
        assert!(payload.receipt_code.starts_with("PN20241105"));
        assert_eq!(payload.total_amount, 2_400_000.0);
        assert_eq!(payload.details.len(), 1);
    }

    #[test]
    fn empty_ledger_is_rejected_before_network() {
        let header = IssueHeader {
            code: String::new(),
            date: date(),
            issue_type: IssueType::Sale,
            customer_id: Some(Uuid::new_v4()),
            created_by_id: "u-1".into(),
        };
        let ledger = AllocationLedger::new(QuantityPrecision::Issue);
        assert_eq!(
            assemble_issue(&header, &ledger, 1).unwrap_err(),
            AssembleError::EmptyDocument
        );
    }

    #[test]
    fn sale_issue_requires_customer_cancel_does_not() {
        let mut ledger = AllocationLedger::new(QuantityPrecision::Issue);
        ledger
            .add(
                NewLine {
                    batch_id: Uuid::new_v4(),
                    batch_code: "LOT-9".into(),
                    product_id: Uuid::new_v4(),
                    product_name: "Gạo".into(),
                    location_id: None,
                    location_name: None,
                    unit: unit("kg", 1.0),
                    quantity: 3.0,
                    remaining_snapshot: Some(10.0),
                    unit_price: None,
                },
                DuplicatePolicy::Reject,
            )
            .unwrap();

        let mut header = IssueHeader {
            code: String::new(),
            date: date(),
            issue_type: IssueType::Sale,
            customer_id: None,
            created_by_id: "u-1".into(),
        };
        assert_eq!(
            assemble_issue(&header, &ledger, 1).unwrap_err(),
            AssembleError::MissingCounterparty
        );

        header.issue_type = IssueType::Cancel;
        let payload = assemble_issue(&header, &ledger, 1).unwrap();
        assert!(payload.customer_id.is_none());
        assert!(payload.issue_code.starts_with("PX"));
    }

    #[test]
    fn adjustment_requires_every_actual_quantity() {
        let header = AdjustmentHeader {
            code: String::new(),
            date: date(),
            created_by: "u-1".into(),
        };
        let mut counts = vec![
            CountLine {
                batch_id: Uuid::new_v4(),
                batch_code: "LOT-1".into(),
                product_name: "Gạo".into(),
                location_name: "Kho A".into(),
                system_quantity: 40.0,
                actual_quantity: Some(38.0),
            },
            CountLine {
                batch_id: Uuid::new_v4(),
                batch_code: "LOT-2".into(),
                product_name: "Đường".into(),
                location_name: "Kho B".into(),
                system_quantity: 12.0,
                actual_quantity: None,
            },
        ];
        assert_eq!(
            assemble_adjustment(&header, &counts, 1).unwrap_err(),
            AssembleError::MissingActualQuantity { count: 1 }
        );

        counts[1].actual_quantity = Some(12.0);
        let payload = assemble_adjustment(&header, &counts, 1).unwrap();
        assert!(payload.code.starts_with("DC20241105"));
        assert_eq!(payload.details.len(), 2);
    }

    // A payload sent and echoed back by the backend must reproduce the
    // totals computed from the ledger before submission.
    #[test]
    fn payload_round_trips_with_equal_totals() {
        let ledger = receipt_ledger();
        let header = ReceiptHeader {
            code: "PN0042".into(),
            date: date(),
            partner_id: Some(Uuid::new_v4()),
            created_by_id: "u-1".into(),
            paid_amount: 100_000.0,
        };
        let payload = assemble_receipt(&header, &ledger, 1).unwrap();

        let json = serde_json::to_string(&payload).unwrap();
        let echoed: GoodsReceiptPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(echoed, payload);

        let echoed_total: f64 = echoed
            .details
            .iter()
            .map(|d| d.quantity * d.unit_price)
            .sum();
        assert_eq!(echoed_total, ledger.total_amount());
        assert_eq!(echoed.total_amount, ledger.total_amount());
    }
}
