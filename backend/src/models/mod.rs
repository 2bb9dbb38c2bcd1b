//! Database models for the fruit inventory backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
