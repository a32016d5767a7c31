pub(crate) mod schema;
pub mod queries;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use deliveries_core::delivery::{Delivery, NewDelivery, SaveDelivery};

use crate::{Database, DbConfig, DbError};

/// Extension trait that converts `rusqlite::Result<T>` into `Result<T, DbError>`.
///
/// `.to_db()?` is the shortest way to surface a rusqlite failure inside the
/// query modules.
pub(crate) trait SqliteResultExt<T> {
    fn to_db(self) -> Result<T, DbError>;
}

impl<T> SqliteResultExt<T> for rusqlite::Result<T> {
    fn to_db(self) -> Result<T, DbError> {
        self.map_err(map_sqlite_err)
    }
}

#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        let path = database_path(config);
        std::fs::create_dir_all(path.parent().unwrap_or(Path::new(".")))?;
        Self::open_path(&path)
    }

    pub fn open_path(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).to_db()?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )
        .to_db()?;
        tracing::debug!(path = %path.display(), "opened sqlite database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().to_db()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DbError> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.with_conn(schema::ensure)?;
        Ok(db)
    }

    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DbError::Internal("lock poisoned".into()))?;
        f(&conn)
    }
}

/// The configured file, or `deliveries.db` under [`crate::data_dir`].
fn database_path(config: &DbConfig) -> PathBuf {
    config
        .sqlite_path
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| crate::data_dir().join("deliveries.db"))
}

/// Map a `rusqlite::Error` into a `DbError::Internal`.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> DbError {
    DbError::Internal(e.to_string())
}

async fn blocking<F, T>(f: F) -> Result<T, DbError>
where
    F: FnOnce() -> Result<T, DbError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DbError::Internal(e.to_string()))?
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn insert_delivery(&self, input: &NewDelivery) -> Result<Delivery, DbError> {
        let db = self.clone();
        let input = input.clone();
        blocking(move || db.insert_delivery_sync(&input)).await
    }

    async fn find_delivery(&self, id: i64) -> Result<Option<Delivery>, DbError> {
        let db = self.clone();
        blocking(move || db.find_delivery_sync(id)).await
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, DbError> {
        let db = self.clone();
        blocking(move || db.list_deliveries_sync()).await
    }

    async fn list_deliveries_by_project(&self, project_id: i32) -> Result<Vec<Delivery>, DbError> {
        let db = self.clone();
        blocking(move || db.list_deliveries_by_project_sync(project_id)).await
    }

    async fn delivery_exists(&self, id: i64) -> Result<bool, DbError> {
        let db = self.clone();
        blocking(move || db.delivery_exists_sync(id)).await
    }

    async fn delete_delivery(&self, id: i64) -> Result<(), DbError> {
        let db = self.clone();
        blocking(move || db.delete_delivery_sync(id)).await
    }

    async fn save_delivery(&self, input: &SaveDelivery) -> Result<Delivery, DbError> {
        let db = self.clone();
        let input = input.clone();
        blocking(move || db.save_delivery_sync(&input)).await
    }
}
