//! SQLite connection pool and migration management.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::records::SqliteRecordRepository;
use crate::db::{Database, DbError, DbResult, Record};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

/// Pool sizing and acquire behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_connections: u32,
    /// How long a request may wait for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite database implementation.
///
/// Owns the single pool shared by every request for the lifetime of the
/// process. Repositories borrow it.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, &PoolOptions::default()).await
    }

    /// Connect using a connection string such as `sqlite://tally.db?mode=rwc`.
    pub async fn connect(url: &str, pool_options: &PoolOptions) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url).map_err(|e| DbError::Connection {
            message: format!("Invalid database URL '{}': {}", url, e),
        })?;
        Self::connect_with(options, pool_options).await
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every in-memory connection is its own database, so the pool is pinned
    /// to one connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            DbError::Connection {
                message: e.to_string(),
            }
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        pool_options: &PoolOptions,
    ) -> DbResult<Self> {
        if pool_options.max_connections == 0 {
            return Err(DbError::Connection {
                message: "max_connections must be at least 1".to_string(),
            });
        }

        debug!(
            max_connections = pool_options.max_connections,
            acquire_timeout_ms = pool_options.acquire_timeout.as_millis() as u64,
            "Opening SQLite pool"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_options.max_connections)
            .acquire_timeout(pool_options.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// The underlying pool, for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Records<'a, R: Record>
        = SqliteRecordRepository<'a, R>
    where
        Self: 'a;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn records<R: Record>(&self) -> Self::Records<'_, R> {
        SqliteRecordRepository::new(&self.pool)
    }
}
