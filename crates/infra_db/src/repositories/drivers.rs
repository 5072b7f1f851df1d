//! Driver store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{DriverId, StoreError, TruckId};
use domain_fleet::driver::{Driver, DriverAvailability};
use domain_fleet::ports::DriverStore;

use crate::error::store_error;

const COLUMNS: &str = "driver_id, name, license_number, phone_number, address, \
     availability_status, assigned_truck, salary, created_at";

#[derive(Debug, sqlx::FromRow)]
struct DriverRow {
    driver_id: i64,
    name: String,
    license_number: String,
    phone_number: String,
    address: String,
    availability_status: String,
    assigned_truck: Option<i64>,
    salary: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<DriverRow> for Driver {
    type Error = StoreError;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        let availability: DriverAvailability = row
            .availability_status
            .parse()
            .map_err(StoreError::internal)?;
        Ok(Driver {
            driver_id: DriverId::new(row.driver_id),
            name: row.name,
            license_number: row.license_number,
            phone_number: row.phone_number,
            address: row.address,
            availability_status: availability,
            assigned_truck: row.assigned_truck.map(TruckId::new),
            salary: row.salary,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed implementation of [`DriverStore`]
#[derive(Debug, Clone)]
pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverStore for DriverRepository {
    async fn insert(&self, driver: &Driver) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO drivers (
                driver_id, name, license_number, phone_number, address,
                availability_status, assigned_truck, salary, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(driver.driver_id.value())
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.phone_number)
        .bind(&driver.address)
        .bind(driver.availability_status.as_str())
        .bind(driver.assigned_truck.map(|t| t.value()))
        .bind(driver.salary)
        .bind(driver.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: DriverId) -> Result<Option<Driver>, StoreError> {
        let row: Option<DriverRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM drivers WHERE driver_id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        row.map(Driver::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Driver>, StoreError> {
        let rows: Vec<DriverRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM drivers ORDER BY driver_id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

        rows.into_iter().map(Driver::try_from).collect()
    }

    async fn update(&self, driver: &Driver) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE drivers SET
                name = $2, license_number = $3, phone_number = $4,
                address = $5, availability_status = $6, assigned_truck = $7,
                salary = $8
            WHERE driver_id = $1
            "#,
        )
        .bind(driver.driver_id.value())
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.phone_number)
        .bind(&driver.address)
        .bind(driver.availability_status.as_str())
        .bind(driver.assigned_truck.map(|t| t.value()))
        .bind(driver.salary)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("driver", driver.driver_id));
        }
        Ok(())
    }

    async fn delete(&self, id: DriverId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM drivers WHERE driver_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
