//! Billing Domain - Payment Lifecycle
//!
//! A bill moves through three payment states:
//!
//! ```text
//!               record payment
//!   pending ───────────────────────► paid (terminal)
//!      │                              ▲
//!      │ sweep: due date passed       │ record payment
//!      ▼                              │
//!   overdue ──────────────────────────┘
//! ```
//!
//! Transitions happen two ways: explicit payment-recording requests, and the
//! [`sweep::OverdueSweep`] - a process-wide periodic task that moves past-due
//! pending bills to overdue without any external request. Both sides write
//! through conditional updates that match the expected current status, so a
//! racing payment and sweep tick on the same bill resolve to exactly one
//! winner.
//!
//! `paid` is terminal: any further status-change request is rejected with
//! [`BillingError::InvalidTransition`], never applied.

pub mod bill;
pub mod error;
pub mod ports;
pub mod services;
pub mod sweep;

pub use bill::{Bill, BillUpdate, NewBill, PaymentMethod, PaymentStatus};
pub use error::{BillingError, SweepError};
pub use ports::BillStore;
pub use services::{BillingService, ClientOutstanding};
pub use sweep::OverdueSweep;
