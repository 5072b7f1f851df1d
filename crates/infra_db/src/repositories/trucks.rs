//! Truck store implementation
//!
//! Insurance details are flattened into two nullable columns; a policy
//! number is what makes the insurance block present.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{StoreError, TruckId};
use domain_fleet::ports::TruckStore;
use domain_fleet::truck::{FuelType, InsuranceDetails, Truck, TruckAvailability};

use crate::error::store_error;

const COLUMNS: &str = "truck_id, registration_number, model, capacity, fuel_type, \
     mileage, availability_status, last_serviced_date, \
     insurance_policy_number, insurance_expiry_date, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct TruckRow {
    truck_id: i64,
    registration_number: String,
    model: String,
    capacity: Decimal,
    fuel_type: String,
    mileage: Option<Decimal>,
    availability_status: String,
    last_serviced_date: Option<NaiveDate>,
    insurance_policy_number: Option<String>,
    insurance_expiry_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TruckRow> for Truck {
    type Error = StoreError;

    fn try_from(row: TruckRow) -> Result<Self, Self::Error> {
        let fuel_type: FuelType = row.fuel_type.parse().map_err(StoreError::internal)?;
        let availability: TruckAvailability = row
            .availability_status
            .parse()
            .map_err(StoreError::internal)?;
        let insurance = row.insurance_policy_number.map(|policy_number| InsuranceDetails {
            policy_number,
            expiry_date: row.insurance_expiry_date,
        });
        Ok(Truck {
            truck_id: TruckId::new(row.truck_id),
            registration_number: row.registration_number,
            model: row.model,
            capacity: row.capacity,
            fuel_type,
            mileage: row.mileage,
            availability_status: availability,
            last_serviced_date: row.last_serviced_date,
            insurance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of [`TruckStore`]
#[derive(Debug, Clone)]
pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TruckStore for TruckRepository {
    async fn insert(&self, truck: &Truck) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO trucks (
                truck_id, registration_number, model, capacity, fuel_type,
                mileage, availability_status, last_serviced_date,
                insurance_policy_number, insurance_expiry_date,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(truck.truck_id.value())
        .bind(&truck.registration_number)
        .bind(&truck.model)
        .bind(truck.capacity)
        .bind(truck.fuel_type.as_str())
        .bind(truck.mileage)
        .bind(truck.availability_status.as_str())
        .bind(truck.last_serviced_date)
        .bind(truck.insurance.as_ref().map(|i| i.policy_number.clone()))
        .bind(truck.insurance.as_ref().and_then(|i| i.expiry_date))
        .bind(truck.created_at)
        .bind(truck.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: TruckId) -> Result<Option<Truck>, StoreError> {
        let row: Option<TruckRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM trucks WHERE truck_id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        row.map(Truck::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Truck>, StoreError> {
        let rows: Vec<TruckRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM trucks ORDER BY truck_id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

        rows.into_iter().map(Truck::try_from).collect()
    }

    async fn update(&self, truck: &Truck) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE trucks SET
                registration_number = $2, model = $3, capacity = $4,
                fuel_type = $5, mileage = $6, availability_status = $7,
                last_serviced_date = $8, insurance_policy_number = $9,
                insurance_expiry_date = $10, updated_at = $11
            WHERE truck_id = $1
            "#,
        )
        .bind(truck.truck_id.value())
        .bind(&truck.registration_number)
        .bind(&truck.model)
        .bind(truck.capacity)
        .bind(truck.fuel_type.as_str())
        .bind(truck.mileage)
        .bind(truck.availability_status.as_str())
        .bind(truck.last_serviced_date)
        .bind(truck.insurance.as_ref().map(|i| i.policy_number.clone()))
        .bind(truck.insurance.as_ref().and_then(|i| i.expiry_date))
        .bind(truck.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("truck", truck.truck_id));
        }
        Ok(())
    }

    async fn delete(&self, id: TruckId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM trucks WHERE truck_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
