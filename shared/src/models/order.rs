//! Outbound orders and batch line items

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an outbound order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "processing" => Some(OrderStatus::Processing),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound sale order
///
/// Created in `Processing`; status transitions are the only mutation after
/// creation. `stock_restored` marks that the order's line items have been
/// credited back to their batches (used by the optional double-restore guard).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundOrder {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub stock_restored: bool,
}

/// One batch-to-order allocation within an outbound sale
///
/// The audit join that makes FIFO consumption traceable per batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundLineItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub batch_id: Uuid,
    pub quantity_sold: Decimal,
    pub unit_sale_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("Processing"), None);
    }
}
