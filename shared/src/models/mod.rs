//! Domain models for the Fruit Inventory Management system

pub mod audit;
pub mod fruit;
pub mod intake;
pub mod order;
pub mod partner;
pub mod user;

pub use audit::*;
pub use fruit::*;
pub use intake::*;
pub use order::*;
pub use partner::*;
pub use user::*;
