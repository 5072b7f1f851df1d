//! Sequence allocation
//!
//! The allocator mints unique, monotonically increasing integer identifiers
//! from named durable counters. Correctness rests entirely on the store's
//! atomic upsert-and-increment: two concurrent allocations for the same
//! counter name must never observe the same pre-increment value, so the
//! read-modify-write is a single storage-layer operation, never an
//! in-process lock.
//!
//! Allocation and entity persistence are deliberately not atomic together:
//! an identifier handed out for a record that is never persisted leaves a
//! permanent gap in that counter. That tradeoff is accepted; the allocator
//! itself never issues duplicates and never skips values.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AllocationError;

/// Durable mapping from a counter name to the last-issued integer.
///
/// `find_or_create_and_increment` is the single atomic step "find or create
/// at zero, then increment, then return". The first call for an unseen name
/// returns 1. Implementations must serialize per counter name at the storage
/// layer; allocations for different names proceed independently.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increments the named counter and returns the new value
    async fn find_or_create_and_increment(&self, name: &str) -> Result<i64, AllocationError>;

    /// Returns the last-issued value for the named counter, if any
    async fn current(&self, name: &str) -> Result<Option<i64>, AllocationError>;
}

/// Identifier types minted from a named counter
pub trait SequencedId: Sized {
    /// Counter name this identifier type draws from
    const COUNTER: &'static str;

    /// Wraps a freshly allocated sequence value
    fn from_sequence(value: i64) -> Self;
}

/// Hands out the next identifier for an entity type.
///
/// Thin typed facade over the [`CounterStore`]; cloning is cheap and clones
/// share the underlying store.
#[derive(Clone)]
pub struct SequenceAllocator {
    store: Arc<dyn CounterStore>,
}

impl SequenceAllocator {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Allocates the next identifier for `I`'s counter.
    ///
    /// Called once per new entity, before the entity becomes durably
    /// visible. On failure nothing was issued and the caller must not
    /// persist the entity.
    pub async fn next<I: SequencedId>(&self) -> Result<I, AllocationError> {
        let value = self.store.find_or_create_and_increment(I::COUNTER).await?;
        Ok(I::from_sequence(value))
    }

    /// Allocates the next value for an explicitly named counter
    pub async fn next_id(&self, counter_name: &str) -> Result<i64, AllocationError> {
        self.store.find_or_create_and_increment(counter_name).await
    }

    /// Last value issued for an explicitly named counter
    pub async fn current(&self, counter_name: &str) -> Result<Option<i64>, AllocationError> {
        self.store.current(counter_name).await
    }
}

impl std::fmt::Debug for SequenceAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceAllocator").finish_non_exhaustive()
    }
}
