//! Supplier and customer master data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supplier delivering fruit via intake transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
}

/// A customer receiving fruit via outbound orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}
