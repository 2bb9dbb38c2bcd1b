//! Middleware for the Fruit Inventory Management backend

pub mod auth;

pub use auth::{auth_middleware, require_role, AuthUser, CurrentUser};
