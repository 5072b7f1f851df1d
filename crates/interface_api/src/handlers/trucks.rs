//! Truck handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::TruckId;
use domain_fleet::Truck;

use crate::dto::truck::{CreateTruckRequest, UpdateTruckRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new truck
pub async fn create_truck(
    State(state): State<AppState>,
    Json(request): Json<CreateTruckRequest>,
) -> Result<(StatusCode, Json<Truck>), ApiError> {
    request.validate()?;
    let truck = state.fleet.create_truck(request.into_new_truck()).await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

/// Lists all trucks
pub async fn list_trucks(State(state): State<AppState>) -> Result<Json<Vec<Truck>>, ApiError> {
    Ok(Json(state.fleet.list_trucks().await?))
}

/// Gets a truck by id
pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Truck>, ApiError> {
    Ok(Json(state.fleet.get_truck(TruckId::new(id)).await?))
}

/// Updates a truck
pub async fn update_truck(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTruckRequest>,
) -> Result<Json<Truck>, ApiError> {
    request.validate()?;
    let truck = state
        .fleet
        .update_truck(TruckId::new(id), request.into_update())
        .await?;
    Ok(Json(truck))
}

/// Deletes a truck
pub async fn delete_truck(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.fleet.delete_truck(TruckId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
