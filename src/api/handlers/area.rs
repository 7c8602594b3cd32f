//! Area CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::auth_extract::AuthUser;
use crate::api::dto::{ApiResponse, CreateAreaRequest, UpdateAreaRequest};
use crate::api::json_body::JsonBody;
use crate::app_state::AppState;
use crate::domain::Area;
use crate::error::{ErrorResponse, RegistryError};

/// `GET /api/areas` - List all areas ordered by `numero`.
///
/// # Errors
///
/// Returns [`RegistryError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/areas",
    tag = "Areas",
    summary = "List areas",
    description = "Returns every area, active or not, ordered by numero.",
    responses(
        (status = 200, description = "Area list", body = Vec<Area>),
    )
)]
pub async fn list_areas(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RegistryError> {
    let areas = state.areas.list().await?;
    Ok(Json(ApiResponse::list(areas)))
}

/// `GET /api/areas/{id}` - Get a single area.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the area does not exist.
#[utoipa::path(
    get,
    path = "/api/areas/{id}",
    tag = "Areas",
    summary = "Get area details",
    params(
        ("id" = Uuid, Path, description = "Area id"),
    ),
    responses(
        (status = 200, description = "Area details", body = Area),
        (status = 404, description = "Area not found", body = ErrorResponse),
    )
)]
pub async fn get_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, RegistryError> {
    let area = state.areas.get(id).await?;
    Ok(Json(ApiResponse::new(area)))
}

/// `POST /api/areas` - Create a new area.
///
/// `codigo` is derived server-side from (`ubicacion`, `numero`).
///
/// # Errors
///
/// Returns [`RegistryError::Conflict`] when the `numero` is already used
/// by any area, including inactive ones.
#[utoipa::path(
    post,
    path = "/api/areas",
    tag = "Areas",
    summary = "Create an area",
    request_body = CreateAreaRequest,
    responses(
        (status = 201, description = "Area created", body = Area),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 409, description = "numero already taken", body = ErrorResponse),
    )
)]
pub async fn create_area(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(req): JsonBody<CreateAreaRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let area = state.areas.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(area, "area created")),
    ))
}

/// `PUT /api/areas/{id}` - Partially update an area.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the area does not exist, or
/// [`RegistryError::Conflict`] when another area holds the target
/// `numero`.
#[utoipa::path(
    put,
    path = "/api/areas/{id}",
    tag = "Areas",
    summary = "Update an area",
    params(
        ("id" = Uuid, Path, description = "Area id"),
    ),
    request_body = UpdateAreaRequest,
    responses(
        (status = 200, description = "Updated area", body = Area),
        (status = 404, description = "Area not found", body = ErrorResponse),
        (status = 409, description = "numero already taken", body = ErrorResponse),
    )
)]
pub async fn update_area(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateAreaRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let area = state.areas.update(id, req).await?;
    Ok(Json(ApiResponse::new(area)))
}

/// `DELETE /api/areas/{id}` - Delete an area with no dependents.
///
/// # Errors
///
/// Returns [`RegistryError::HasDependents`] when beacons still reference
/// the area; nothing is deleted in that case.
#[utoipa::path(
    delete,
    path = "/api/areas/{id}",
    tag = "Areas",
    summary = "Delete an area",
    params(
        ("id" = Uuid, Path, description = "Area id"),
    ),
    responses(
        (status = 200, description = "Deleted area", body = Area),
        (status = 400, description = "Area still has beacons", body = ErrorResponse),
        (status = 404, description = "Area not found", body = ErrorResponse),
    )
)]
pub async fn delete_area(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, RegistryError> {
    let area = state.areas.delete(id).await?;
    Ok(Json(ApiResponse::with_message(area, "area deleted")))
}

/// Area management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/areas", get(list_areas).post(create_area))
        .route(
            "/areas/{id}",
            get(get_area).put(update_area).delete(delete_area),
        )
}
