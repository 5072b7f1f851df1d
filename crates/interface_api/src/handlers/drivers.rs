//! Driver handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::DriverId;
use domain_fleet::Driver;

use crate::dto::driver::{CreateDriverRequest, UpdateDriverRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new driver
pub async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), ApiError> {
    request.validate()?;
    let driver = state.fleet.create_driver(request.into_new_driver()).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

/// Lists all drivers
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, ApiError> {
    Ok(Json(state.fleet.list_drivers().await?))
}

/// Gets a driver by id
pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Driver>, ApiError> {
    Ok(Json(state.fleet.get_driver(DriverId::new(id)).await?))
}

/// Updates a driver
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, ApiError> {
    request.validate()?;
    let driver = state
        .fleet
        .update_driver(DriverId::new(id), request.into_update())
        .await?;
    Ok(Json(driver))
}

/// Deletes a driver
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.fleet.delete_driver(DriverId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
