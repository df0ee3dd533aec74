//! PostgreSQL pool, migrations and liveness ping

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Open a pool using the configured limits and timeouts
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(&config.url)?.application_name("user-registry");
    let min_connections = min_connections(config);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        max = config.max_connections,
        min = min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Round-trip a trivial query
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Database ping failed");
        return Err(e);
    }
    Ok(())
}

// A floor above the ceiling would make the pool refuse to start
fn min_connections(config: &DatabaseConfig) -> u32 {
    config.min_connections.min(config.max_connections)
}
