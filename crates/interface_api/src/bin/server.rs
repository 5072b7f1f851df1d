//! Freight Core - API Server Binary
//!
//! Starts the HTTP API server and the overdue reconciliation sweep.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin freight-api
//!
//! # Run with environment variables
//! FREIGHT_HOST=0.0.0.0 FREIGHT_PORT=8080 DATABASE_URL=postgres://... cargo run --bin freight-api
//! ```
//!
//! # Environment Variables
//!
//! * `FREIGHT_HOST` - Server host (default: 0.0.0.0)
//! * `FREIGHT_PORT` - Server port (default: 8080)
//! * `FREIGHT_JWT_SECRET` - JWT signing secret (required in production)
//! * `FREIGHT_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `FREIGHT_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `FREIGHT_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `FREIGHT_SWEEP_INTERVAL_SECS` - Overdue sweep period (default: 86400)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SequenceAllocator;
use domain_billing::{BillingService, OverdueSweep};
use domain_fleet::FleetService;
use infra_db::{
    create_pool, run_migrations, BillRepository, ClientRepository, CounterRepository,
    DatabaseConfig, DriverRepository, ShipmentRepository, TruckRepository,
};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "starting freight-core API server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
    run_migrations(&pool).await?;

    // Wire the repositories into the domain services.
    let counters = Arc::new(CounterRepository::new(pool.clone()));
    let allocator = SequenceAllocator::new(counters.clone());
    let bills = Arc::new(BillRepository::new(pool.clone()));

    let fleet = FleetService::new(
        allocator.clone(),
        Arc::new(ClientRepository::new(pool.clone())),
        Arc::new(DriverRepository::new(pool.clone())),
        Arc::new(TruckRepository::new(pool.clone())),
        Arc::new(ShipmentRepository::new(pool.clone())),
    );
    let billing = BillingService::new(allocator, bills.clone());

    // The sweep is process-wide: one task, started at boot, independent of
    // request handling. Its first tick fires immediately as a catch-up pass.
    let sweep = OverdueSweep::new(bills, Duration::from_secs(config.sweep_interval_secs));
    let sweep_task = tokio::spawn(sweep.run());

    let state = AppState {
        fleet,
        billing,
        counters,
        config: config.clone(),
    };
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweep_task.abort();
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Loads API configuration from `FREIGHT_`-prefixed environment variables,
/// with `DATABASE_URL` honored as the conventional fallback
fn load_config() -> ApiConfig {
    let mut config = ApiConfig::from_env().unwrap_or_default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    config
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
