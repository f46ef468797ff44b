pub mod models;
pub mod repository;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config;

/// Build the application pool from DATABASE_URL and the configured limits.
pub async fn connect() -> anyhow::Result<PgPool> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let cfg = config::config();

    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.database.connection_timeout))
        .connect(&url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("database pool ready");
    Ok(pool)
}
