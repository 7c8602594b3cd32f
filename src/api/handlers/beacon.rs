//! Beacon CRUD and bulk-provisioning handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::auth_extract::AuthUser;
use crate::api::dto::{
    ApiResponse, BeaconFilters, BulkCreateBeaconsRequest, CreateBeaconRequest,
    UpdateBeaconRequest,
};
use crate::api::json_body::JsonBody;
use crate::app_state::AppState;
use crate::domain::Beacon;
use crate::error::{ErrorResponse, RegistryError};

/// `GET /api/beacons` - List beacons, optionally filtered.
///
/// # Errors
///
/// Returns [`RegistryError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/beacons",
    tag = "Beacons",
    summary = "List beacons",
    description = "Returns beacons newest-first. `nivel` filters by exact match, \
                   `codSensor` by case-insensitive substring.",
    params(
        ("nivel" = Option<i32>, Query, description = "Exact nivel match"),
        ("codSensor" = Option<String>, Query, description = "codSensor substring"),
    ),
    responses(
        (status = 200, description = "Beacon list", body = Vec<Beacon>),
    )
)]
pub async fn list_beacons(
    State(state): State<AppState>,
    Query(filters): Query<BeaconFilters>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacons = state.beacons.list(&filters).await?;
    Ok(Json(ApiResponse::list(beacons)))
}

/// `GET /api/beacons/{id}` - Get a single beacon.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the beacon does not exist.
#[utoipa::path(
    get,
    path = "/api/beacons/{id}",
    tag = "Beacons",
    summary = "Get beacon details",
    params(
        ("id" = Uuid, Path, description = "Beacon id"),
    ),
    responses(
        (status = 200, description = "Beacon details", body = Beacon),
        (status = 404, description = "Beacon not found", body = ErrorResponse),
    )
)]
pub async fn get_beacon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacon = state.beacons.get(id).await?;
    Ok(Json(ApiResponse::new(beacon)))
}

/// `POST /api/beacons` - Create a single beacon.
///
/// `codSensor` is derived from the owning area; the stored `z` is always
/// the pinned mounting height.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] on missing required fields or
/// an unrecognized `nivel`.
#[utoipa::path(
    post,
    path = "/api/beacons",
    tag = "Beacons",
    summary = "Create a beacon",
    request_body = CreateBeaconRequest,
    responses(
        (status = 201, description = "Beacon created", body = Beacon),
        (status = 400, description = "Validation failure", body = ErrorResponse),
    )
)]
pub async fn create_beacon(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(req): JsonBody<CreateBeaconRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacon = state.beacons.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(beacon, "beacon created")),
    ))
}

/// `POST /api/beacons/bulk` - Create a batch of beacons atomically.
///
/// The whole batch succeeds or fails as a unit; a single invalid item
/// (named by position in the error) means zero beacons are written.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] for the first invalid item, or
/// [`RegistryError::Database`] if an insert fails after validation (the
/// transaction is rolled back).
#[utoipa::path(
    post,
    path = "/api/beacons/bulk",
    tag = "Beacons",
    summary = "Bulk-create beacons",
    request_body = BulkCreateBeaconsRequest,
    responses(
        (status = 201, description = "All beacons created", body = Vec<Beacon>),
        (status = 400, description = "Validation failure, nothing written", body = ErrorResponse),
    )
)]
pub async fn bulk_create_beacons(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(req): JsonBody<BulkCreateBeaconsRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacons = state.beacons.bulk_create(req.beacons).await?;
    let message = format!("{} beacons created", beacons.len());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::list_with_message(beacons, message)),
    ))
}

/// `PATCH /api/beacons/{id}` - Partially update a beacon.
///
/// Omitted fields keep their stored values; `z` is re-pinned on every
/// call.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the beacon does not exist.
#[utoipa::path(
    patch,
    path = "/api/beacons/{id}",
    tag = "Beacons",
    summary = "Update a beacon",
    params(
        ("id" = Uuid, Path, description = "Beacon id"),
    ),
    request_body = UpdateBeaconRequest,
    responses(
        (status = 200, description = "Updated beacon", body = Beacon),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 404, description = "Beacon not found", body = ErrorResponse),
    )
)]
pub async fn update_beacon(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateBeaconRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacon = state.beacons.update(id, req).await?;
    Ok(Json(ApiResponse::with_message(beacon, "beacon updated")))
}

/// `DELETE /api/beacons/{id}` - Delete a beacon.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the beacon does not exist.
#[utoipa::path(
    delete,
    path = "/api/beacons/{id}",
    tag = "Beacons",
    summary = "Delete a beacon",
    params(
        ("id" = Uuid, Path, description = "Beacon id"),
    ),
    responses(
        (status = 200, description = "Deleted beacon", body = Beacon),
        (status = 404, description = "Beacon not found", body = ErrorResponse),
    )
)]
pub async fn delete_beacon(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, RegistryError> {
    let beacon = state.beacons.delete(id).await?;
    Ok(Json(ApiResponse::with_message(beacon, "beacon deleted")))
}

/// Beacon management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/beacons", get(list_beacons).post(create_beacon))
        .route("/beacons/bulk", post(bulk_create_beacons))
        .route(
            "/beacons/{id}",
            get(get_beacon).patch(update_beacon).delete(delete_beacon),
        )
}
