//! Client store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use core_kernel::{ClientId, StoreError};
use domain_fleet::client::{Client, ClientStatus};
use domain_fleet::ports::ClientStore;

use crate::error::store_error;

const COLUMNS: &str = "client_id, client_name, email, phone_number, company_name, \
     industry, status, note, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    client_id: i64,
    client_name: String,
    email: String,
    phone_number: String,
    company_name: String,
    industry: String,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = StoreError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let status: ClientStatus = row.status.parse().map_err(StoreError::internal)?;
        Ok(Client {
            client_id: ClientId::new(row.client_id),
            client_name: row.client_name,
            email: row.email,
            phone_number: row.phone_number,
            company_name: row.company_name,
            industry: row.industry,
            status,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of [`ClientStore`]
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn insert(&self, client: &Client) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                client_id, client_name, email, phone_number, company_name,
                industry, status, note, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(client.client_id.value())
        .bind(&client.client_name)
        .bind(&client.email)
        .bind(&client.phone_number)
        .bind(&client.company_name)
        .bind(&client.industry)
        .bind(client.status.as_str())
        .bind(&client.note)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        let row: Option<ClientRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM clients WHERE client_id = $1"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?;

        row.map(Client::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, StoreError> {
        let rows: Vec<ClientRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM clients ORDER BY client_id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_error)?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn update(&self, client: &Client) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                client_name = $2, email = $3, phone_number = $4,
                company_name = $5, industry = $6, status = $7, note = $8,
                updated_at = $9
            WHERE client_id = $1
            "#,
        )
        .bind(client.client_id.value())
        .bind(&client.client_name)
        .bind(&client.email)
        .bind(&client.phone_number)
        .bind(&client.company_name)
        .bind(&client.industry)
        .bind(client.status.as_str())
        .bind(&client.note)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("client", client.client_id));
        }
        Ok(())
    }

    async fn delete(&self, id: ClientId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM clients WHERE client_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
