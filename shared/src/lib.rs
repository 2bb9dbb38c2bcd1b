//! Shared types and models for the Fruit Inventory Management system
//!
//! This crate contains types shared between the backend server and any
//! other components of the system (CLI tooling, future frontends).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
