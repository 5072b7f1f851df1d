//! Bill store implementation
//!
//! Status transitions are conditional updates: the `WHERE` clause matches
//! the statuses the state machine allows to move, so a payment request and
//! a sweep tick racing on the same bill serialize at the row and exactly one
//! side changes it. A zero-row match is then disambiguated with a follow-up
//! read: the bill is either gone (not found) or in a state the transition
//! forbids.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{BillId, ClientId, ShipmentId, StoreError};
use domain_billing::bill::{Bill, PaymentMethod, PaymentStatus};
use domain_billing::error::BillingError;
use domain_billing::ports::BillStore;

use crate::error::store_error;

const COLUMNS: &str = "bill_id, client_id, shipment_id, issue_date, due_date, amount, \
     tax_amount, total_amount, payment_status, payment_method, payment_date, \
     gstin, special_instructions, fuel_cost, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    bill_id: i64,
    client_id: i64,
    shipment_id: i64,
    issue_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    amount: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    payment_status: String,
    payment_method: Option<String>,
    payment_date: Option<DateTime<Utc>>,
    gstin: Option<String>,
    special_instructions: Option<String>,
    fuel_cost: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BillRow> for Bill {
    type Error = StoreError;

    fn try_from(row: BillRow) -> Result<Self, Self::Error> {
        let payment_status: PaymentStatus =
            row.payment_status.parse().map_err(StoreError::internal)?;
        let payment_method: Option<PaymentMethod> = row
            .payment_method
            .map(|m| m.parse())
            .transpose()
            .map_err(StoreError::internal)?;
        Ok(Bill {
            bill_id: BillId::new(row.bill_id),
            client_id: ClientId::new(row.client_id),
            shipment_id: ShipmentId::new(row.shipment_id),
            issue_date: row.issue_date,
            due_date: row.due_date,
            amount: row.amount,
            tax_amount: row.tax_amount,
            total_amount: row.total_amount,
            payment_status,
            payment_method,
            payment_date: row.payment_date,
            gstin: row.gstin,
            special_instructions: row.special_instructions,
            fuel_cost: row.fuel_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of [`BillStore`]
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explains a conditional update that matched nothing: the bill is
    /// missing, or its current status forbids the transition.
    async fn rejection(&self, id: BillId, to: PaymentStatus) -> BillingError {
        match self.find(id).await {
            Ok(Some(bill)) => BillingError::InvalidTransition {
                from: bill.payment_status,
                to,
            },
            Ok(None) => BillingError::NotFound(id),
            Err(e) => e.into(),
        }
    }
}

#[async_trait]
impl BillStore for BillRepository {
    async fn insert(&self, bill: &Bill) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO bills (
                bill_id, client_id, shipment_id, issue_date, due_date,
                amount, tax_amount, total_amount, payment_status,
                payment_method, payment_date, gstin, special_instructions,
                fuel_cost, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(bill.bill_id.value())
        .bind(bill.client_id.value())
        .bind(bill.shipment_id.value())
        .bind(bill.issue_date)
        .bind(bill.due_date)
        .bind(bill.amount)
        .bind(bill.tax_amount)
        .bind(bill.total_amount)
        .bind(bill.payment_status.as_str())
        .bind(bill.payment_method.map(|m| m.as_str()))
        .bind(bill.payment_date)
        .bind(&bill.gstin)
        .bind(&bill.special_instructions)
        .bind(bill.fuel_cost)
        .bind(bill.created_at)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: BillId) -> Result<Option<Bill>, StoreError> {
        let row: Option<BillRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM bills WHERE bill_id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        row.map(Bill::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let rows: Vec<BillRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM bills ORDER BY bill_id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Bill>, StoreError> {
        let rows: Vec<BillRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM bills WHERE payment_status = $1 ORDER BY bill_id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    async fn list_by_client(&self, client: ClientId) -> Result<Vec<Bill>, StoreError> {
        let rows: Vec<BillRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM bills WHERE client_id = $1 ORDER BY bill_id"
        ))
        .bind(client.value())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    async fn list_past_due(&self, now: DateTime<Utc>) -> Result<Vec<Bill>, StoreError> {
        let rows: Vec<BillRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM bills \
             WHERE due_date < $1 AND payment_status <> 'paid' ORDER BY due_date"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    async fn update(&self, bill: &Bill) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE bills SET
                due_date = $2, amount = $3, tax_amount = $4,
                total_amount = $5, payment_method = $6, gstin = $7,
                special_instructions = $8, fuel_cost = $9, updated_at = $10
            WHERE bill_id = $1
            "#,
        )
        .bind(bill.bill_id.value())
        .bind(bill.due_date)
        .bind(bill.amount)
        .bind(bill.tax_amount)
        .bind(bill.total_amount)
        .bind(bill.payment_method.map(|m| m.as_str()))
        .bind(&bill.gstin)
        .bind(&bill.special_instructions)
        .bind(bill.fuel_cost)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("bill", bill.bill_id));
        }
        Ok(())
    }

    async fn delete(&self, id: BillId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bills WHERE bill_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_payment(
        &self,
        id: BillId,
        paid_at: DateTime<Utc>,
    ) -> Result<Bill, BillingError> {
        let row: Option<BillRow> = sqlx::query_as(&format!(
            "UPDATE bills \
             SET payment_status = 'paid', payment_date = $2, updated_at = $3 \
             WHERE bill_id = $1 AND payment_status IN ('pending', 'overdue') \
             RETURNING {COLUMNS}"
        ))
        .bind(id.value())
        .bind(paid_at)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(row) => Ok(Bill::try_from(row)?),
            None => Err(self.rejection(id, PaymentStatus::Paid).await),
        }
    }

    async fn mark_overdue(&self, id: BillId) -> Result<Bill, BillingError> {
        let row: Option<BillRow> = sqlx::query_as(&format!(
            "UPDATE bills \
             SET payment_status = 'overdue', updated_at = $2 \
             WHERE bill_id = $1 AND payment_status = 'pending' \
             RETURNING {COLUMNS}"
        ))
        .bind(id.value())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(row) => Ok(Bill::try_from(row)?),
            None => Err(self.rejection(id, PaymentStatus::Overdue).await),
        }
    }

    async fn mark_overdue_due_before(&self, now: DateTime<Utc>) -> Result<u64, BillingError> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET payment_status = 'overdue', updated_at = $1
            WHERE payment_status = 'pending' AND due_date < $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}
