//! Client handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ClientId;
use domain_fleet::Client;

use crate::dto::client::{CreateClientRequest, UpdateClientRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new client
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    request.validate()?;
    let client = state.fleet.create_client(request.into_new_client()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Lists all clients
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.fleet.list_clients().await?))
}

/// Gets a client by id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.fleet.get_client(ClientId::new(id)).await?))
}

/// Updates a client
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    request.validate()?;
    let client = state
        .fleet
        .update_client(ClientId::new(id), request.into_update())
        .await?;
    Ok(Json(client))
}

/// Deletes a client
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.fleet.delete_client(ClientId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
