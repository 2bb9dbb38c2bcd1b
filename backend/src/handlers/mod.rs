//! HTTP handlers for the fruit inventory backend

pub mod activity;
pub mod auth;
pub mod batch;
pub mod customer;
pub mod fruit;
pub mod health;
pub mod intake;
pub mod order;
pub mod supplier;

pub use activity::*;
pub use auth::*;
pub use batch::*;
pub use customer::*;
pub use fruit::*;
pub use health::*;
pub use intake::*;
pub use order::*;
pub use supplier::*;
