pub(crate) mod schema;
pub mod queries;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use deliveries_core::delivery::{Delivery, NewDelivery, SaveDelivery};

use crate::{Database, DbError};

/// Map a sqlx::Error into a DbError::Internal.
pub(crate) fn pg_err(e: sqlx::Error) -> DbError {
    DbError::Internal(e.to_string())
}

#[derive(Clone)]
pub struct PostgresDatabase {
    pub(crate) pool: PgPool,
}

impl PostgresDatabase {
    /// Connect to a Postgres database and create the schema if missing.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .map_err(pg_err)?;

        schema::ensure(&pool).await?;
        tracing::debug!("connected to postgres");
        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn insert_delivery(&self, input: &NewDelivery) -> Result<Delivery, DbError> {
        self.pg_insert_delivery(input).await
    }
    async fn find_delivery(&self, id: i64) -> Result<Option<Delivery>, DbError> {
        self.pg_find_delivery(id).await
    }
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, DbError> {
        self.pg_list_deliveries().await
    }
    async fn list_deliveries_by_project(&self, project_id: i32) -> Result<Vec<Delivery>, DbError> {
        self.pg_list_deliveries_by_project(project_id).await
    }
    async fn delivery_exists(&self, id: i64) -> Result<bool, DbError> {
        self.pg_delivery_exists(id).await
    }
    async fn delete_delivery(&self, id: i64) -> Result<(), DbError> {
        self.pg_delete_delivery(id).await
    }
    async fn save_delivery(&self, input: &SaveDelivery) -> Result<Delivery, DbError> {
        self.pg_save_delivery(input).await
    }
}
