//! API error handling
//!
//! Domain errors map onto HTTP statuses here and nowhere else:
//! missing records are 404, rejected payment-status transitions are 409,
//! identifier-allocation failures surface as 503 so clients retry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::{AllocationError, StoreError};
use domain_billing::BillingError;
use domain_fleet::FleetError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unauthorized".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

fn from_store(error: StoreError) -> ApiError {
    match error {
        StoreError::NotFound { .. } => ApiError::NotFound(error.to_string()),
        StoreError::Conflict(_) => ApiError::Conflict(error.to_string()),
        StoreError::Connection(_) => ApiError::Unavailable(error.to_string()),
        StoreError::Internal(_) => ApiError::Internal(error.to_string()),
    }
}

impl From<FleetError> for ApiError {
    fn from(error: FleetError) -> Self {
        match error {
            FleetError::NotFound { .. } => ApiError::NotFound(error.to_string()),
            FleetError::Allocation(e) => ApiError::from(e),
            FleetError::Store(e) => from_store(e),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(error: BillingError) -> Self {
        match error {
            BillingError::NotFound(_) => ApiError::NotFound(error.to_string()),
            BillingError::InvalidTransition { .. } => ApiError::Conflict(error.to_string()),
            BillingError::Allocation(e) => ApiError::from(e),
            BillingError::Store(e) => from_store(e),
        }
    }
}

/// A failed allocation means nothing was persisted; retrying the request
/// gets a fresh identifier, so this is a retryable 503.
impl From<AllocationError> for ApiError {
    fn from(error: AllocationError) -> Self {
        ApiError::Unavailable(error.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
