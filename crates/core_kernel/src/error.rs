//! Core error types used across the system

use std::fmt;
use thiserror::Error;

/// Error returned by the sequence allocator.
///
/// An allocation failure means no identifier was issued; the caller must
/// abort the creation and must not persist the entity. Retrying is the
/// caller's decision and always means a fresh allocation call.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The counter store could not be reached
    #[error("counter store unavailable: {0}")]
    Unavailable(String),

    /// The atomic increment itself failed
    #[error("atomic increment failed for counter '{name}': {message}")]
    UpdateFailed { name: String, message: String },
}

impl AllocationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        AllocationError::Unavailable(message.into())
    }

    pub fn update_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        AllocationError::UpdateFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns true if the failure may succeed on a fresh attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, AllocationError::Unavailable(_))
    }
}

/// Error type shared by all entity store ports
///
/// Adapters (database or in-memory) translate their native failures into
/// this type so domain services handle storage uniformly.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found
    #[error("not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation conflicts with existing data
    #[error("conflict: {0}")]
    Conflict(String),

    /// Connection to the underlying store failed
    #[error("connection error: {0}")]
    Connection(String),

    /// An internal adapter error occurred
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }

    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if the failure may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}
