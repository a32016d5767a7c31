use chrono::{DateTime, Utc};

use deliveries_core::delivery::{Delivery, NewDelivery, SaveDelivery};

use super::super::{pg_err, PostgresDatabase};
use crate::DbError;

#[derive(sqlx::FromRow)]
struct DeliveryRow {
    id: i64,
    title: String,
    description: Option<String>,
    file_url: Option<String>,
    created_at: DateTime<Utc>,
    project_id: i32,
}

impl From<DeliveryRow> for Delivery {
    fn from(r: DeliveryRow) -> Self {
        Delivery {
            id: r.id,
            title: r.title,
            description: r.description,
            file_url: r.file_url,
            created_at: r.created_at,
            project_id: r.project_id,
        }
    }
}

impl PostgresDatabase {
    pub(crate) async fn pg_insert_delivery(&self, input: &NewDelivery) -> Result<Delivery, DbError> {
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        let row = sqlx::query_as::<_, DeliveryRow>(
            "INSERT INTO deliveries (title, description, file_url, created_at, project_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.file_url)
        .bind(created_at)
        .bind(input.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(pg_err)?;

        Ok(row.into())
    }

    pub(crate) async fn pg_find_delivery(&self, id: i64) -> Result<Option<Delivery>, DbError> {
        let row = sqlx::query_as::<_, DeliveryRow>("SELECT * FROM deliveries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(pg_err)?;

        Ok(row.map(Into::into))
    }

    pub(crate) async fn pg_list_deliveries(&self) -> Result<Vec<Delivery>, DbError> {
        let rows = sqlx::query_as::<_, DeliveryRow>("SELECT * FROM deliveries ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(pg_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub(crate) async fn pg_list_deliveries_by_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<Delivery>, DbError> {
        let rows = sqlx::query_as::<_, DeliveryRow>(
            "SELECT * FROM deliveries WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(pg_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub(crate) async fn pg_delivery_exists(&self, id: i64) -> Result<bool, DbError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM deliveries WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(pg_err)
    }

    pub(crate) async fn pg_delete_delivery(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM deliveries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(pg_err)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("delivery {id}")));
        }
        Ok(())
    }

    pub(crate) async fn pg_save_delivery(&self, input: &SaveDelivery) -> Result<Delivery, DbError> {
        let row = sqlx::query_as::<_, DeliveryRow>(
            "INSERT INTO deliveries (id, title, description, file_url, created_at, project_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, $6), $7)
             ON CONFLICT (id) DO UPDATE SET
                 title       = EXCLUDED.title,
                 description = EXCLUDED.description,
                 file_url    = EXCLUDED.file_url,
                 created_at  = COALESCE($5, deliveries.created_at),
                 project_id  = EXCLUDED.project_id
             RETURNING *",
        )
        .bind(input.id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.file_url)
        .bind(input.created_at)
        .bind(Utc::now())
        .bind(input.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(pg_err)?;

        Ok(row.into())
    }
}
