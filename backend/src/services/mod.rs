//! Business logic services for the fruit inventory backend

pub mod audit;
pub mod auth;
pub mod customer;
pub mod fruit;
pub mod intake;
pub mod ledger;
pub mod order;
pub mod supplier;

pub use audit::AuditService;
pub use auth::AuthService;
pub use customer::CustomerService;
pub use fruit::FruitService;
pub use intake::IntakeService;
pub use ledger::LedgerService;
pub use order::OrderService;
pub use supplier::SupplierService;
