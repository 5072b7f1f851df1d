//! HTTP API Layer
//!
//! REST API for the freight administration system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each entity type
//! - **Middleware**: Authentication and audit logging
//! - **DTOs**: Request/response data transfer objects with validation
//! - **Error Handling**: One domain-error-to-status mapping in [`error`]
//!
//! Handlers talk to the domain services held in [`AppState`]; nothing in
//! this crate touches storage directly, so the router runs identically over
//! PostgreSQL repositories and the in-memory stores the tests use.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::CounterStore;
use domain_billing::BillingService;
use domain_fleet::FleetService;

use crate::config::ApiConfig;
use crate::handlers::{bills, clients, drivers, health, shipments, trucks};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub fleet: FleetService,
    pub billing: BillingService,
    pub counters: Arc<dyn CounterStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let client_routes = Router::new()
        .route("/", post(clients::create_client))
        .route("/", get(clients::list_clients))
        .route("/:id", get(clients::get_client))
        .route("/:id", put(clients::update_client))
        .route("/:id", delete(clients::delete_client));

    let driver_routes = Router::new()
        .route("/", post(drivers::create_driver))
        .route("/", get(drivers::list_drivers))
        .route("/:id", get(drivers::get_driver))
        .route("/:id", put(drivers::update_driver))
        .route("/:id", delete(drivers::delete_driver));

    let truck_routes = Router::new()
        .route("/", post(trucks::create_truck))
        .route("/", get(trucks::list_trucks))
        .route("/:id", get(trucks::get_truck))
        .route("/:id", put(trucks::update_truck))
        .route("/:id", delete(trucks::delete_truck));

    let shipment_routes = Router::new()
        .route("/", post(shipments::create_shipment))
        .route("/", get(shipments::list_shipments))
        .route("/client/:client_id", get(shipments::list_shipments_by_client))
        .route("/:id", get(shipments::get_shipment))
        .route("/:id", put(shipments::update_shipment))
        .route("/:id", delete(shipments::delete_shipment));

    let bill_routes = Router::new()
        .route("/", post(bills::create_bill))
        .route("/", get(bills::list_bills))
        .route("/overdue", get(bills::list_overdue_bills))
        .route("/status/:status", get(bills::list_bills_by_status))
        .route("/client/:client_id", get(bills::list_bills_by_client))
        .route(
            "/client/:client_id/outstanding",
            get(bills::get_outstanding_by_client),
        )
        .route("/:id", get(bills::get_bill))
        .route("/:id", put(bills::update_bill))
        .route("/:id", delete(bills::delete_bill))
        .route("/:id/status", put(bills::update_payment_status))
        .route("/:id/pay", post(bills::pay_bill));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/clients", client_routes)
        .nest("/drivers", driver_routes)
        .nest("/trucks", truck_routes)
        .nest("/shipments", shipment_routes)
        .nest("/bills", bill_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
