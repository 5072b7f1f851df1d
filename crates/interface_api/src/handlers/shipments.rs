//! Shipment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::{ClientId, ShipmentId};
use domain_fleet::Shipment;

use crate::dto::shipment::{CreateShipmentRequest, UpdateShipmentRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new shipment
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(request): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<Shipment>), ApiError> {
    request.validate()?;
    let shipment = state
        .fleet
        .create_shipment(request.into_new_shipment())
        .await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

/// Lists all shipments
pub async fn list_shipments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Shipment>>, ApiError> {
    Ok(Json(state.fleet.list_shipments().await?))
}

/// Lists shipments for one client
pub async fn list_shipments_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<Vec<Shipment>>, ApiError> {
    let shipments = state
        .fleet
        .list_shipments_by_client(ClientId::new(client_id))
        .await?;
    Ok(Json(shipments))
}

/// Gets a shipment by id
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Shipment>, ApiError> {
    Ok(Json(state.fleet.get_shipment(ShipmentId::new(id)).await?))
}

/// Updates a shipment
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateShipmentRequest>,
) -> Result<Json<Shipment>, ApiError> {
    request.validate()?;
    let shipment = state
        .fleet
        .update_shipment(ShipmentId::new(id), request.into_update())
        .await?;
    Ok(Json(shipment))
}

/// Deletes a shipment
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.fleet.delete_shipment(ShipmentId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
