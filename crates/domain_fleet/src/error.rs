//! Fleet domain errors

use thiserror::Error;

use core_kernel::{AllocationError, StoreError};

/// Errors that can occur in the fleet domain
#[derive(Debug, Error)]
pub enum FleetError {
    /// The requested record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Identifier allocation failed; the entity was not persisted
    #[error("identifier allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FleetError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        FleetError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            FleetError::NotFound { .. } => true,
            FleetError::Store(e) => e.is_not_found(),
            FleetError::Allocation(_) => false,
        }
    }
}
