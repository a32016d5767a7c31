use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deliveries_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let db = deliveries_db::open_database(&config.db_config()).await?;
    info!(backend = %config.db_backend, "database ready");

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    eprintln!("deliveries-server listening on http://{addr}");

    deliveries_server::serve(listener, db).await?;
    Ok(())
}
