//! Billing domain errors

use thiserror::Error;

use core_kernel::{AllocationError, BillId, StoreError};

use crate::bill::PaymentStatus;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// The state machine forbids the requested transition
    #[error("invalid payment status transition: {from} -> {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// The requested bill does not exist
    #[error("bill not found: {0}")]
    NotFound(BillId),

    /// Identifier allocation failed; the bill was not persisted
    #[error("identifier allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BillingError {
    pub fn is_not_found(&self) -> bool {
        match self {
            BillingError::NotFound(_) => true,
            BillingError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// A failed sweep iteration.
///
/// Logged and retried on the next tick; never surfaced to a user and never
/// fatal to the host process.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("overdue sweep iteration failed: {0}")]
    Billing(#[from] BillingError),
}
