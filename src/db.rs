//! Database pool setup and schema migrations.
//!
//! Migrations live in `migrations/` at the crate root and are embedded into the
//! binary at compile time.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;

pub type DbPool = SqlitePool;

/// Opens a pool for `database_url`, creating the database file if missing.
///
/// In-memory databases are limited to a single connection, since every
/// SQLite connection to `:memory:` would otherwise see its own empty database.
pub async fn connect(database_url: &str) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = pool_options(database_url).connect_with(options).await?;

    log::debug!("Connected to {}", database_url);
    Ok(pool)
}

fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        // The database lives only as long as its single connection.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// Applies all pending migrations.
pub async fn migrate(pool: &DbPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database schema is up to date");
    Ok(())
}
