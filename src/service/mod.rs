//! Service layer: one service per resource, each owning its invariants.
//!
//! Services hold a clone of the shared `PgPool` and are injected into
//! handlers through [`crate::app_state::AppState`].

pub mod area_service;
pub mod auth_service;
pub mod beacon_service;

pub use area_service::AreaService;
pub use auth_service::{AuthService, Claims, TokenIssuer};
pub use beacon_service::BeaconService;
