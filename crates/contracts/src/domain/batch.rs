use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A traceable lot of stock received together. `remaining_quantity` is in
/// base units and is mutated only by the backend; the client treats it as a
/// read-only upper bound when allocating issues and adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBatch {
    pub id: Uuid,
    pub batch_code: String,
    pub product_id: Uuid,
    #[serde(default)]
    pub product_name: Option<String>,
    pub location_id: Uuid,
    #[serde(default)]
    pub location_name: Option<String>,
    pub initial_quantity: f64,
    pub remaining_quantity: f64,
    pub unit_cost: f64,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}

impl InventoryBatch {
    /// Display-only classification: an unconsumed batch older than the
    /// product's slow-moving threshold.
    pub fn is_slow_moving(&self, threshold_days: u32, now: DateTime<Utc>) -> bool {
        match self.received_at {
            Some(received) if self.remaining_quantity > 0.0 => {
                (now - received).num_days() >= i64::from(threshold_days)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn batch(remaining: f64, age_days: i64, now: DateTime<Utc>) -> InventoryBatch {
        InventoryBatch {
            id: Uuid::new_v4(),
            batch_code: "LOT-001".into(),
            product_id: Uuid::new_v4(),
            product_name: None,
            location_id: Uuid::new_v4(),
            location_name: None,
            initial_quantity: 100.0,
            remaining_quantity: remaining,
            unit_cost: 12_000.0,
            received_at: Some(now - Duration::days(age_days)),
        }
    }

    #[test]
    fn slow_moving_requires_age_and_stock() {
        let now = Utc::now();
        assert!(batch(5.0, 120, now).is_slow_moving(90, now));
        assert!(!batch(5.0, 30, now).is_slow_moving(90, now));
        // fully consumed batches are never flagged
        assert!(!batch(0.0, 120, now).is_slow_moving(90, now));
    }
}
