//! SQLite connection pool initialization and embedded migrations.
//!
//! The database URL is read from `DATABASE_URL` (e.g.
//! `sqlite://robokademi.db`). The database file is created on first run
//! and the migrations under `migrations/` are embedded into the binary
//! and applied at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Embedded migrations, shared with the integration tests.
pub static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn init_db_pool() -> anyhow::Result<SqlitePool> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://robokademi.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)
        .context("invalid DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    Ok(pool)
}
