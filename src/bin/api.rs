//! Tally API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use miette::Diagnostic;
use tally::api::{self, Config, ServerError};
use tally::db::{Database, DbError, SqliteDatabase};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(tally::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(tally::binary::api))]
    Server(#[from] ServerError),
}

/// Flags override the matching environment variables.
#[derive(Parser)]
#[command(name = "tally-api")]
#[command(author, version, about = "Tally record API server", long_about = None)]
struct Cli {
    /// Host address to bind to [env: HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [env: PORT, default: 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database connection string [env: DATABASE_URL, default: sqlite://tally.db?mode=rwc]
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum pooled database connections [env: TALLY_DB_MAX_CONNECTIONS]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_connections: Option<u32>,

    /// Per-request timeout in seconds [env: TALLY_REQUEST_TIMEOUT_SECS]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(url) = self.database_url {
            config = config.with_database_url(url);
        }
        if let Some(max) = self.max_connections {
            config = config.with_max_connections(max);
        }
        if let Some(secs) = self.request_timeout {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let config = Cli::parse().into_config();
    api::init_tracing();

    info!(url = %config.database_url, "Opening database");
    let db = SqliteDatabase::connect(&config.database_url, &config.pool_options()).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    api::run(config, db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "tally-api",
            "--port",
            "9000",
            "--max-connections",
            "3",
            "--request-timeout",
            "10",
        ])
        .unwrap();

        let config = cli.into_config();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        assert!(Cli::try_parse_from(["tally-api", "--max-connections", "0"]).is_err());
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["tally-api", "--request-timeout", "0"]).is_err());
    }
}
