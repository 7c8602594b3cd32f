//! Registration and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, AuthData, LoginRequest, RegisterRequest, UserDto};
use crate::api::json_body::JsonBody;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RegistryError};

/// `POST /api/auth/register` - Register a new user.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] for a short password and
/// [`RegistryError::Conflict`] when the email or username exists.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    summary = "Register a user",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, token issued", body = AuthData),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 409, description = "Email or username taken", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let (user, token) = state.auth.register(req).await?;
    let data = AuthData {
        user: UserDto::from(user),
        token,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(data, "user registered")),
    ))
}

/// `POST /api/auth/login` - Authenticate and obtain a bearer token.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidCredentials`] for a bad email or
/// password; the response does not reveal which.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthData),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    let (user, token) = state.auth.login(req).await?;
    let data = AuthData {
        user: UserDto::from(user),
        token,
    };
    Ok(Json(ApiResponse::with_message(data, "login successful")))
}

/// Authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
