//! Tests for the sequence allocator contract

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use core_kernel::{
    AllocationError, BillId, ClientId, CounterStore, SequenceAllocator, SequencedId,
};

/// Minimal in-memory counter store. A single mutex over the map makes the
/// read-modify-write one atomic step, matching the contract the Postgres
/// adapter satisfies with an upsert-returning statement.
#[derive(Default)]
struct MapCounterStore {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl CounterStore for MapCounterStore {
    async fn find_or_create_and_increment(&self, name: &str) -> Result<i64, AllocationError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|e| AllocationError::unavailable(e.to_string()))?;
        let sequence = counters.entry(name.to_string()).or_insert(0);
        *sequence += 1;
        Ok(*sequence)
    }

    async fn current(&self, name: &str) -> Result<Option<i64>, AllocationError> {
        let counters = self
            .counters
            .lock()
            .map_err(|e| AllocationError::unavailable(e.to_string()))?;
        Ok(counters.get(name).copied())
    }
}

/// Store that always fails, for surfacing behavior
struct BrokenCounterStore;

#[async_trait]
impl CounterStore for BrokenCounterStore {
    async fn find_or_create_and_increment(&self, name: &str) -> Result<i64, AllocationError> {
        Err(AllocationError::update_failed(name, "store offline"))
    }

    async fn current(&self, _name: &str) -> Result<Option<i64>, AllocationError> {
        Err(AllocationError::unavailable("store offline"))
    }
}

fn allocator() -> SequenceAllocator {
    SequenceAllocator::new(std::sync::Arc::new(MapCounterStore::default()))
}

#[tokio::test]
async fn first_use_of_unseen_counter_returns_one() {
    let allocator = allocator();

    assert_eq!(allocator.next_id("bill_id").await.unwrap(), 1);
    assert_eq!(allocator.next_id("bill_id").await.unwrap(), 2);
    assert_eq!(allocator.next_id("bill_id").await.unwrap(), 3);
}

#[tokio::test]
async fn counters_for_different_names_are_independent() {
    let allocator = allocator();

    assert_eq!(allocator.next_id(ClientId::COUNTER).await.unwrap(), 1);
    assert_eq!(allocator.next_id(ClientId::COUNTER).await.unwrap(), 2);
    assert_eq!(allocator.next_id(BillId::COUNTER).await.unwrap(), 1);
    assert_eq!(allocator.current(ClientId::COUNTER).await.unwrap(), Some(2));
    assert_eq!(allocator.current(BillId::COUNTER).await.unwrap(), Some(1));
}

#[tokio::test]
async fn typed_allocation_uses_the_type_counter() {
    let allocator = allocator();

    let client: ClientId = allocator.next().await.unwrap();
    let bill: BillId = allocator.next().await.unwrap();

    assert_eq!(client, ClientId::new(1));
    assert_eq!(bill, BillId::new(1));
    assert_eq!(allocator.current("client_id").await.unwrap(), Some(1));
}

#[tokio::test]
async fn concurrent_allocations_yield_distinct_values() {
    let allocator = allocator();
    let n = 100;

    let mut handles = Vec::new();
    for _ in 0..n {
        let allocator = allocator.clone();
        handles.push(tokio::spawn(
            async move { allocator.next_id("x").await.unwrap() },
        ));
    }

    let mut issued = HashSet::new();
    for handle in handles {
        issued.insert(handle.await.unwrap());
    }

    // N concurrent callers receive N distinct values, and the stored
    // sequence equals the count of issued identifiers.
    assert_eq!(issued.len(), n);
    assert_eq!(issued.iter().max(), Some(&(n as i64)));
    assert_eq!(allocator.current("x").await.unwrap(), Some(n as i64));
}

#[tokio::test]
async fn allocation_failure_is_surfaced_not_swallowed() {
    let allocator = SequenceAllocator::new(std::sync::Arc::new(BrokenCounterStore));

    let err = allocator.next::<BillId>().await.unwrap_err();
    match err {
        AllocationError::UpdateFailed { ref name, .. } => assert_eq!(name, BillId::COUNTER),
        other => panic!("expected UpdateFailed, got {other:?}"),
    }
    assert!(!err.is_transient());
    assert!(AllocationError::unavailable("x").is_transient());
}

#[tokio::test]
async fn unseen_counter_has_no_current_value() {
    let allocator = allocator();
    assert_eq!(allocator.current("never_used").await.unwrap(), None);
}
