//! Database Infrastructure Layer
//!
//! PostgreSQL adapters for the store ports defined by `core_kernel`,
//! `domain_fleet`, and `domain_billing`, built on SQLx.
//!
//! Two pieces of the system's concurrency contract live here:
//!
//! - [`repositories::CounterRepository`] mints identifiers with a single
//!   `INSERT ... ON CONFLICT ... RETURNING` statement, so concurrent
//!   allocations for the same counter serialize on the counter row.
//! - [`repositories::BillRepository`] applies payment-status transitions as
//!   conditional `UPDATE`s that match the expected current status, so a
//!   payment request and an overdue sweep tick never both win.
//!
//! Domain code never sees SQLx types; failures are translated through
//! [`DatabaseError`] into the store error types the ports speak.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    BillRepository, ClientRepository, CounterRepository, DriverRepository, ShipmentRepository,
    TruckRepository,
};
