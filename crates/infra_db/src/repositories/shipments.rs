//! Shipment store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ClientId, ShipmentId, StoreError};
use domain_fleet::ports::ShipmentStore;
use domain_fleet::shipment::{Shipment, ShipmentStatus};

use crate::error::store_error;

const COLUMNS: &str = "shipment_id, client_id, pickup_location, delivery_location, \
     cargo_type, cargo_weight, special_instructions, departure_date, \
     arrival_date, status, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ShipmentRow {
    shipment_id: i64,
    client_id: i64,
    pickup_location: String,
    delivery_location: String,
    cargo_type: String,
    cargo_weight: Decimal,
    special_instructions: Option<String>,
    departure_date: DateTime<Utc>,
    arrival_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = StoreError;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        let status: ShipmentStatus = row.status.parse().map_err(StoreError::internal)?;
        Ok(Shipment {
            shipment_id: ShipmentId::new(row.shipment_id),
            client_id: ClientId::new(row.client_id),
            pickup_location: row.pickup_location,
            delivery_location: row.delivery_location,
            cargo_type: row.cargo_type,
            cargo_weight: row.cargo_weight,
            special_instructions: row.special_instructions,
            departure_date: row.departure_date,
            arrival_date: row.arrival_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of [`ShipmentStore`]
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    pool: PgPool,
}

impl ShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentStore for ShipmentRepository {
    async fn insert(&self, shipment: &Shipment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO shipments (
                shipment_id, client_id, pickup_location, delivery_location,
                cargo_type, cargo_weight, special_instructions,
                departure_date, arrival_date, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(shipment.shipment_id.value())
        .bind(shipment.client_id.value())
        .bind(&shipment.pickup_location)
        .bind(&shipment.delivery_location)
        .bind(&shipment.cargo_type)
        .bind(shipment.cargo_weight)
        .bind(&shipment.special_instructions)
        .bind(shipment.departure_date)
        .bind(shipment.arrival_date)
        .bind(shipment.status.as_str())
        .bind(shipment.created_at)
        .bind(shipment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: ShipmentId) -> Result<Option<Shipment>, StoreError> {
        let row: Option<ShipmentRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM shipments WHERE shipment_id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Shipment::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Shipment>, StoreError> {
        let rows: Vec<ShipmentRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM shipments ORDER BY shipment_id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Shipment::try_from).collect()
    }

    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Shipment>, StoreError> {
        let rows: Vec<ShipmentRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM shipments WHERE client_id = $1 ORDER BY shipment_id"
        ))
        .bind(client.value())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Shipment::try_from).collect()
    }

    async fn update(&self, shipment: &Shipment) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE shipments SET
                pickup_location = $2, delivery_location = $3, cargo_type = $4,
                cargo_weight = $5, special_instructions = $6,
                departure_date = $7, arrival_date = $8, status = $9,
                updated_at = $10
            WHERE shipment_id = $1
            "#,
        )
        .bind(shipment.shipment_id.value())
        .bind(&shipment.pickup_location)
        .bind(&shipment.delivery_location)
        .bind(&shipment.cargo_type)
        .bind(shipment.cargo_weight)
        .bind(&shipment.special_instructions)
        .bind(shipment.departure_date)
        .bind(shipment.arrival_date)
        .bind(shipment.status.as_str())
        .bind(shipment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("shipment", shipment.shipment_id));
        }
        Ok(())
    }

    async fn delete(&self, id: ShipmentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM shipments WHERE shipment_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
