use sqlx::PgPool;

use super::pg_err;
use crate::DbError;

/// Arbitrary but fixed key for the advisory lock that serialises schema
/// creation across concurrently starting servers.
const SCHEMA_LOCK_KEY: i64 = 0x64656C69_76657279; // "delivery" as hex

pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await.map_err(pg_err)?;

    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await
        .map_err(pg_err)?;

    let result = sqlx::raw_sql(
        "CREATE TABLE IF NOT EXISTS deliveries (
            id          BIGSERIAL PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT,
            file_url    TEXT,
            created_at  TIMESTAMPTZ NOT NULL,
            project_id  INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_deliveries_project ON deliveries(project_id);",
    )
    .execute(&mut *conn)
    .await
    .map(|_| ())
    .map_err(pg_err);

    // Release even if creation failed.
    let unlocked = sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await;
    if let Err(e) = unlocked {
        // Session locks end with the session, so keep this connection out
        // of the pool.
        tracing::warn!(error = %e, "failed to release schema lock, closing connection");
        drop(conn.detach());
    }

    result
}
