use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use deliveries_db::{Backend, DbConfig};

#[derive(Debug, Parser)]
#[command(name = "deliveries-server", about = "Delivery records REST API")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "DELIVERIES_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "DELIVERIES_PORT", default_value = "8080")]
    pub port: u16,

    /// Storage backend: sqlite or postgres
    #[arg(long, env = "DELIVERIES_DB_BACKEND", default_value = "sqlite")]
    pub db_backend: Backend,

    /// SQLite database file. Defaults to the XDG data dir.
    #[arg(long, env = "DELIVERIES_SQLITE_PATH")]
    pub sqlite_path: Option<String>,

    /// Postgres connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.db_backend,
            sqlite_path: self.sqlite_path.clone(),
            database_url: self.database_url.clone(),
        }
    }
}
