//! Core Kernel - Foundational types for the freight system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed sequential entity identifiers
//! - The sequence allocator and its counter-store port
//! - Common error types shared by the ports

pub mod error;
pub mod identifiers;
pub mod sequence;

pub use error::{AllocationError, StoreError};
pub use identifiers::{BillId, ClientId, DriverId, ShipmentId, TruckId};
pub use sequence::{CounterStore, SequenceAllocator, SequencedId};
