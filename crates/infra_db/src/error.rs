//! Database error types and translation into the store-port errors

use thiserror::Error;

use core_kernel::{AllocationError, StoreError};

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors onto specific variants by PostgreSQL error code
///
/// Codes: <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                        "23503" => {
                            DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                        }
                        "23514" => {
                            DatabaseError::ConstraintViolation(db_err.message().to_string())
                        }
                        _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Translation into the port-level store error the domain services handle
impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => StoreError::internal(message),
            DatabaseError::DuplicateEntry(message)
            | DatabaseError::ForeignKeyViolation(message)
            | DatabaseError::ConstraintViolation(message) => StoreError::conflict(message),
            DatabaseError::ConnectionFailed(message) => StoreError::connection(message),
            DatabaseError::PoolExhausted => {
                StoreError::connection("connection pool exhausted".to_string())
            }
            other => StoreError::internal(other.to_string()),
        }
    }
}

/// Counter-table failures map onto the allocator's error contract: anything
/// connection-shaped is retryable, everything else is a failed increment.
pub(crate) fn allocation_error(counter: &str, error: sqlx::Error) -> AllocationError {
    let db_error = DatabaseError::from(error);
    if db_error.is_connection_error() {
        AllocationError::unavailable(db_error.to_string())
    } else {
        AllocationError::update_failed(counter, db_error.to_string())
    }
}

/// Shorthand for the common `sqlx::Error` → [`StoreError`] hop
pub(crate) fn store_error(error: sqlx::Error) -> StoreError {
    DatabaseError::from(error).into()
}
