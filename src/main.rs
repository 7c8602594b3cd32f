//! beacon-registry server entry point.
//!
//! Starts the Axum HTTP server over a PostgreSQL-backed registry.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use beacon_registry::api;
use beacon_registry::app_state::AppState;
use beacon_registry::config::RegistryConfig;
use beacon_registry::persistence;
use beacon_registry::service::{AreaService, AuthService, BeaconService, TokenIssuer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RegistryConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting beacon-registry");

    // Build the shared pool and apply migrations
    let pool = persistence::connect(&config).await?;
    persistence::run_migrations(&pool).await?;

    // Build service layer
    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours);
    let app_state = AppState {
        areas: Arc::new(AreaService::new(pool.clone())),
        beacons: Arc::new(BeaconService::new(
            pool.clone(),
            config.recognized_levels.clone(),
        )),
        auth: Arc::new(AuthService::new(pool.clone(), tokens)),
        db: pool,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
