//! Database connection and pool management.
//!
//! Opens a SeaORM connection pool for whichever backend the configured URL
//! names (MySQL in production, SQLite for local runs and tests).

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;

use crate::config::AppConfig;

/// Acquire wait used when no `DB_ACQUIRE_TIMEOUT_MS` is configured. A
/// saturated pool queues callers instead of failing them.
pub const UNBOUNDED_ACQUIRE_WAIT: Duration = Duration::from_secs(u32::MAX as u64);

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {source}")]
    ConnectionFailed {
        #[from]
        source: sea_orm::DbErr,
    },
    #[error("Invalid database configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Initializes a database connection pool with the given configuration.
///
/// Connects once and verifies the pool with [`health_check`]. Failure is
/// returned to the caller; startup treats it as fatal.
///
/// ```no_run
/// use microsite::{config::AppConfig, db::init_pool};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let db = init_pool(&AppConfig::default()).await?;
///     microsite::db::health_check(&db).await?;
///     Ok(())
/// }
/// ```
pub async fn init_pool(cfg: &AppConfig) -> Result<DatabaseConnection> {
    if cfg.database_url.trim().is_empty() {
        return Err(DatabaseError::InvalidConfiguration {
            message: "Database URL cannot be empty".to_string(),
        }
        .into());
    }

    let acquire_timeout = cfg
        .db_acquire_timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(UNBOUNDED_ACQUIRE_WAIT);

    let mut opt = ConnectOptions::new(&cfg.database_url);
    opt.max_connections(cfg.db_max_connections)
        .acquire_timeout(acquire_timeout)
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let conn = Database::connect(opt).await.map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        DatabaseError::ConnectionFailed { source: e }
    })?;

    health_check(&conn).await?;
    log::info!(
        "Connected to {:?} database (max {} connections)",
        conn.get_database_backend(),
        cfg.db_max_connections
    );

    Ok(conn)
}

/// Runs `SELECT 1` against the pool.
pub async fn health_check(db: &DatabaseConnection) -> Result<()> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());

    db.query_one(stmt)
        .await
        .context("Database health check failed")?;

    Ok(())
}
