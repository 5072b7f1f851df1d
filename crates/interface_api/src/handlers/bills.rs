//! Bill handlers
//!
//! Payment status never moves through the detail-update endpoint; the
//! status route and the pay route are the only doors, and both go through
//! the state machine.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{BillId, ClientId};
use domain_billing::{Bill, PaymentStatus};

use crate::dto::bill::{
    CreateBillRequest, OutstandingResponse, PayBillRequest, UpdateBillRequest,
    UpdatePaymentStatusRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new bill; it always starts pending
pub async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    request.validate()?;
    let bill = state.billing.create_bill(request.into_new_bill()).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// Lists all bills
pub async fn list_bills(State(state): State<AppState>) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(state.billing.list_bills().await?))
}

/// Lists unpaid bills whose due date has passed
pub async fn list_overdue_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(state.billing.list_past_due().await?))
}

/// Lists bills in the given payment status
pub async fn list_bills_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Bill>>, ApiError> {
    let status: PaymentStatus = status.parse().map_err(ApiError::BadRequest)?;
    Ok(Json(state.billing.list_by_status(status).await?))
}

/// Lists bills for one client
pub async fn list_bills_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<Vec<Bill>>, ApiError> {
    let bills = state
        .billing
        .list_by_client(ClientId::new(client_id))
        .await?;
    Ok(Json(bills))
}

/// Total of a client's pending bills, with the bills themselves
pub async fn get_outstanding_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<OutstandingResponse>, ApiError> {
    let outstanding = state
        .billing
        .outstanding_by_client(ClientId::new(client_id))
        .await?;
    Ok(Json(OutstandingResponse {
        client_id: outstanding.client_id.value(),
        total_outstanding: outstanding.total_outstanding,
        bills: outstanding.bills,
    }))
}

/// Gets a bill by id
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Bill>, ApiError> {
    Ok(Json(state.billing.get_bill(BillId::new(id)).await?))
}

/// Updates bill details; payment status is not reachable here
pub async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBillRequest>,
) -> Result<Json<Bill>, ApiError> {
    request.validate()?;
    let bill = state
        .billing
        .update_bill(BillId::new(id), request.into_update())
        .await?;
    Ok(Json(bill))
}

/// Deletes a bill
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.billing.delete_bill(BillId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Explicit payment-status change; illegal transitions come back 409
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Bill>, ApiError> {
    let bill = state
        .billing
        .set_payment_status(BillId::new(id), request.payment_status, request.payment_date)
        .await?;
    Ok(Json(bill))
}

/// Records a payment against a bill; the body is optional
pub async fn pay_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<PayBillRequest>>,
) -> Result<Json<Bill>, ApiError> {
    let paid_at = body.and_then(|Json(request)| request.payment_date);
    let bill = state.billing.record_payment(BillId::new(id), paid_at).await?;
    Ok(Json(bill))
}
