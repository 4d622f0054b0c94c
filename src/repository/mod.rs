//! Repository layer for database operations

pub mod equipment;
pub mod records;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::{config::DatabaseConfig, error::AppResult};

/// Schema migrations embedded from `./migrations`
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub equipment: equipment::EquipmentRepository,
    pub records: records::RecordsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            records: records::RecordsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the pool described by `config` and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(config.enforce_foreign_keys)
            .busy_timeout(Duration::from_secs(5));

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);

        if config.is_in_memory() {
            // The database lives as long as its connection does
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        } else {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url = %config.url, "Connected to database");

        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Round-trip to the store, used by the readiness probe
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database")
}
