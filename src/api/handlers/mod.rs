//! REST endpoint handlers organized by resource.

pub mod area;
pub mod auth;
pub mod beacon;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(area::routes())
        .merge(beacon::routes())
        .merge(auth::routes())
}
