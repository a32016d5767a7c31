pub mod config;
pub mod error;
mod routes;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use deliveries_db::Database;
use deliveries_service::LocalService;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, db: Arc<dyn Database>) -> Result<()> {
    let service = LocalService::new(db);
    let app = routes::build_router(service);
    axum::serve(listener, app).await?;
    Ok(())
}
