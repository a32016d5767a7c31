#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::PostgresDatabase;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use deliveries_core::delivery::{Delivery, NewDelivery, SaveDelivery};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

/// Persistence for delivery records.
///
/// Listing methods return rows in id (insertion) order. Nothing here knows
/// about validation: callers hand in records that already passed it.
#[async_trait]
pub trait Database: Send + Sync {
    async fn insert_delivery(&self, input: &NewDelivery) -> Result<Delivery, DbError>;
    async fn find_delivery(&self, id: i64) -> Result<Option<Delivery>, DbError>;
    async fn list_deliveries(&self) -> Result<Vec<Delivery>, DbError>;
    async fn list_deliveries_by_project(&self, project_id: i32) -> Result<Vec<Delivery>, DbError>;
    async fn delivery_exists(&self, id: i64) -> Result<bool, DbError>;
    async fn delete_delivery(&self, id: i64) -> Result<(), DbError>;
    /// Insert or replace the row with `input.id`.
    async fn save_delivery(&self, input: &SaveDelivery) -> Result<Delivery, DbError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "sqlite" => Some(Backend::Sqlite),
            "postgres" | "postgresql" => Some(Backend::Postgres),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::parse_str(s).ok_or_else(|| format!("unknown database backend: {s}"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub backend: Backend,
    /// SQLite file; defaults to `<data dir>/deliveries.db`.
    pub sqlite_path: Option<String>,
    /// Postgres connection URL, required for the postgres backend.
    pub database_url: Option<String>,
}

/// Open the backend named by `config`.
pub async fn open_database(config: &DbConfig) -> Result<Arc<dyn Database>, DbError> {
    match config.backend {
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => Ok(Arc::new(SqliteDatabase::open(config)?)),
        #[cfg(feature = "postgres")]
        Backend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                DbError::Internal("DATABASE_URL is required for the postgres backend".into())
            })?;
            Ok(Arc::new(PostgresDatabase::connect(url).await?))
        }
        #[allow(unreachable_patterns)]
        other => Err(DbError::Internal(format!(
            "{other} backend not compiled in (enable the `{other}` feature)"
        ))),
    }
}

/// `$XDG_DATA_HOME/deliveries`, falling back to `~/.local/share/deliveries`.
pub fn data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("deliveries")
}
