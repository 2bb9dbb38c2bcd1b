//! Intake transactions and FIFO stock batches

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An intake transaction recorded when stock arrives from a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeTransaction {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub supplier_id: Uuid,
    pub user_id: Uuid,
    pub total_cost: Decimal,
}

/// A discrete lot of stock received in one intake transaction
///
/// `intake_date` is the FIFO ordering key. `initial_quantity` is immutable
/// once set; `current_quantity` only changes through the batch ledger and
/// satisfies `0 <= current_quantity <= initial_quantity`. Batches persist at
/// zero quantity as the audit trail of consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBatch {
    pub id: Uuid,
    pub intake_id: Uuid,
    pub fruit_type_id: Uuid,
    pub intake_date: NaiveDate,
    pub initial_quantity: Decimal,
    pub current_quantity: Decimal,
    pub quality_grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Shelf-life status of a batch relative to its fruit's shelf life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    Fresh,
    Warning,
    Critical,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "fresh",
            FreshnessStatus::Warning => "warning",
            FreshnessStatus::Critical => "critical",
        }
    }
}

/// Classify a batch by the fraction of shelf life it has left
///
/// A batch with 20% or less of its shelf life remaining is critical, 50% or
/// less is a warning. A zero shelf life always classifies as critical.
pub fn freshness_status(age_days: i64, shelf_life_days: i32) -> FreshnessStatus {
    if shelf_life_days <= 0 {
        return FreshnessStatus::Critical;
    }
    let days_left = shelf_life_days as i64 - age_days;
    let remaining = days_left as f64 / shelf_life_days as f64;

    if remaining <= 0.2 {
        FreshnessStatus::Critical
    } else if remaining <= 0.5 {
        FreshnessStatus::Warning
    } else {
        FreshnessStatus::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_batch() {
        // 10-day shelf life, 2 days old: 80% remaining
        assert_eq!(freshness_status(2, 10), FreshnessStatus::Fresh);
    }

    #[test]
    fn warning_batch() {
        // 10-day shelf life, 5 days old: exactly 50% remaining
        assert_eq!(freshness_status(5, 10), FreshnessStatus::Warning);
    }

    #[test]
    fn critical_batch() {
        assert_eq!(freshness_status(8, 10), FreshnessStatus::Critical);
        // Past expiry
        assert_eq!(freshness_status(15, 10), FreshnessStatus::Critical);
    }

    #[test]
    fn zero_shelf_life_is_critical() {
        assert_eq!(freshness_status(0, 0), FreshnessStatus::Critical);
    }
}
