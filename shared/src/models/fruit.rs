//! Fruit type master data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fruit type registered in the master catalogue
///
/// `aggregate_stock` is a cached total that must always equal the sum of
/// `current_quantity` across the fruit's stock batches. It is mutated only
/// through the batch ledger, never written directly by other workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitType {
    pub id: Uuid,
    pub name: String,
    /// Unit of measure, e.g. "kg" or "box"
    pub unit: String,
    pub shelf_life_days: i32,
    pub unit_price: Decimal,
    pub aggregate_stock: Decimal,
}
