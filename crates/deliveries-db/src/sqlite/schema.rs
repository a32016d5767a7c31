use rusqlite::Connection;

use super::SqliteResultExt;
use crate::DbError;

/// Idempotent: safe to run on every open.
pub fn ensure(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS deliveries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            description TEXT,
            file_url    TEXT,
            created_at  TEXT NOT NULL,
            project_id  INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_deliveries_project ON deliveries(project_id);
        ",
    )
    .to_db()
}
