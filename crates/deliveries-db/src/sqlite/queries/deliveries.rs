use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use deliveries_core::delivery::{Delivery, NewDelivery, SaveDelivery};

use super::super::{SqliteDatabase, SqliteResultExt};
use crate::DbError;

fn row_to_delivery(row: &Row) -> rusqlite::Result<Delivery> {
    Ok(Delivery {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        file_url: row.get("file_url")?,
        created_at: row.get("created_at")?,
        project_id: row.get("project_id")?,
    })
}

impl SqliteDatabase {
    pub fn insert_delivery_sync(&self, input: &NewDelivery) -> Result<Delivery, DbError> {
        self.with_conn(|conn| {
            let created_at = input.created_at.unwrap_or_else(Utc::now);
            conn.execute(
                "INSERT INTO deliveries (title, description, file_url, created_at, project_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    input.title,
                    input.description,
                    input.file_url,
                    created_at,
                    input.project_id
                ],
            )
            .to_db()?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                "SELECT * FROM deliveries WHERE id = ?1",
                params![id],
                row_to_delivery,
            )
            .to_db()
        })
    }

    pub fn find_delivery_sync(&self, id: i64) -> Result<Option<Delivery>, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM deliveries WHERE id = ?1",
                params![id],
                row_to_delivery,
            )
            .optional()
            .to_db()
        })
    }

    pub fn list_deliveries_sync(&self) -> Result<Vec<Delivery>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM deliveries ORDER BY id")
                .to_db()?;
            let deliveries = stmt
                .query_map([], row_to_delivery)
                .to_db()?
                .collect::<Result<Vec<_>, _>>()
                .to_db()?;
            Ok(deliveries)
        })
    }

    pub fn list_deliveries_by_project_sync(&self, project_id: i32) -> Result<Vec<Delivery>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM deliveries WHERE project_id = ?1 ORDER BY id")
                .to_db()?;
            let deliveries = stmt
                .query_map(params![project_id], row_to_delivery)
                .to_db()?
                .collect::<Result<Vec<_>, _>>()
                .to_db()?;
            Ok(deliveries)
        })
    }

    pub fn delivery_exists_sync(&self, id: i64) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM deliveries WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
            .to_db()
        })
    }

    pub fn delete_delivery_sync(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let changed = conn
                .execute("DELETE FROM deliveries WHERE id = ?1", params![id])
                .to_db()?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("delivery {id}")));
            }
            Ok(())
        })
    }

    pub fn save_delivery_sync(&self, input: &SaveDelivery) -> Result<Delivery, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO deliveries (id, title, description, file_url, created_at, project_id)
                 VALUES (?1, ?2, ?3, ?4, COALESCE(?5, ?6), ?7)
                 ON CONFLICT(id) DO UPDATE SET
                     title       = excluded.title,
                     description = excluded.description,
                     file_url    = excluded.file_url,
                     created_at  = COALESCE(?5, deliveries.created_at),
                     project_id  = excluded.project_id",
                params![
                    input.id,
                    input.title,
                    input.description,
                    input.file_url,
                    input.created_at,
                    Utc::now(),
                    input.project_id
                ],
            )
            .to_db()?;
            conn.query_row(
                "SELECT * FROM deliveries WHERE id = ?1",
                params![input.id],
                row_to_delivery,
            )
            .to_db()
        })
    }
}
