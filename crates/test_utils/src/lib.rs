//! Test Utilities Crate
//!
//! Shared test infrastructure for the freight-core test suite.
//!
//! # Modules
//!
//! - `memory`: In-memory store implementations of every persistence port
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `generators`: Property-based test data generators

pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod memory;

pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use memory::*;
