//! PostgreSQL pool construction and connectivity checks.

use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use utoipa::ToSchema;

use crate::config::RegistryConfig;

/// Builds the bounded connection pool.
///
/// Checkout is blocking up to the configured acquire timeout; exhaustion
/// surfaces as [`sqlx::Error::PoolTimedOut`] from the acquiring
/// operation, never a crash. Connections return to the pool on every
/// exit path because sqlx ties checkout to a guard's lifetime.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if the initial connection cannot be
/// established.
pub async fn connect(config: &RegistryConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Applies pending migrations from the `migrations/` directory.
///
/// # Errors
///
/// Returns a [`sqlx::migrate::MigrateError`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Result of the health probe round trip.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthSnapshot {
    /// Whether `SELECT 1` succeeded.
    pub connected: bool,
    /// Number of area records.
    pub areas: i64,
    /// Number of beacon records.
    pub beacons: i64,
}

/// Executes a trivial round-trip query plus record counts.
///
/// Consumed only by external monitoring via `GET /health`; the
/// registries never call this.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if the round trip or either count fails.
pub async fn health_snapshot(pool: &PgPool) -> Result<HealthSnapshot, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;

    let areas = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM areas")
        .fetch_one(pool)
        .await?;
    let beacons = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM beacons")
        .fetch_one(pool)
        .await?;

    Ok(HealthSnapshot {
        connected: true,
        areas,
        beacons,
    })
}
