//! Counter table backing the sequence allocator
//!
//! Each entity type owns one row in `counters`. Allocation is a single
//! upsert: insert the row at 1 if the counter has never been used, otherwise
//! increment it, and return the resulting value. PostgreSQL serializes
//! concurrent statements on the same row, so two allocations can never
//! observe the same sequence value, across every connection and process
//! sharing the database.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{AllocationError, CounterStore};

use crate::error::allocation_error;

/// PostgreSQL-backed implementation of [`CounterStore`]
#[derive(Debug, Clone)]
pub struct CounterRepository {
    pool: PgPool,
}

impl CounterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for CounterRepository {
    async fn find_or_create_and_increment(&self, name: &str) -> Result<i64, AllocationError> {
        let (sequence,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO counters (name, sequence)
            VALUES ($1, 1)
            ON CONFLICT (name)
            DO UPDATE SET sequence = counters.sequence + 1
            RETURNING sequence
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| allocation_error(name, e))?;

        Ok(sequence)
    }

    async fn current(&self, name: &str) -> Result<Option<i64>, AllocationError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT sequence FROM counters WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| allocation_error(name, e))?;

        Ok(row.map(|(sequence,)| sequence))
    }
}
