//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::service::{AreaService, AuthService, BeaconService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Area registry.
    pub areas: Arc<AreaService>,
    /// Beacon registry.
    pub beacons: Arc<BeaconService>,
    /// Credential and token service.
    pub auth: Arc<AuthService>,
    /// Raw pool handle, used only by the health probe.
    pub db: PgPool,
}
