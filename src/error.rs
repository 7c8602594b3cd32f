//! Registry error types with HTTP status code mapping.
//!
//! [`RegistryError`] is the central error type for the service. Each variant
//! maps to an HTTP status code and the uniform JSON error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "error": "missing required field: nombre"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for errors.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Request validation failed before any storage call.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness invariant would be violated (area `numero`,
    /// user `email`/`username`).
    #[error("{0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Area deletion blocked because beacons still reference it.
    #[error("area has associated beacons and cannot be deleted")]
    HasDependents,

    /// Login failed. Deliberately a single generic message for both
    /// unknown email and wrong password, so the response cannot be used
    /// as a user-enumeration oracle.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, or expired bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Storage failure. The inner error is logged with detail; clients
    /// only ever see the generic message.
    #[error("internal server error")]
    Database(#[from] sqlx::Error),

    /// Unexpected non-storage failure. Same client-facing treatment as
    /// [`RegistryError::Database`].
    #[error("internal server error")]
    Internal(String),
}

impl RegistryError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::HasDependents => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        // Storage detail stays in the logs; the client gets the generic
        // message from Display.
        match &self {
            Self::Database(e) => tracing::error!(error = %e, "database failure"),
            Self::Internal(msg) => tracing::error!(error = %msg, "internal failure"),
            _ => {}
        }

        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Translates a unique-constraint violation into [`RegistryError::Conflict`]
/// with a friendly message; every other error passes through unchanged.
///
/// The pre-insert uniqueness queries in the services only exist for
/// friendlier messages; the database constraint is the source of truth
/// under concurrent writers, and this is where the losing writer's
/// error lands.
#[must_use]
pub fn map_unique_violation(err: sqlx::Error, conflict_message: &str) -> RegistryError {
    if let sqlx::Error::Database(ref db) = err
        && db.is_unique_violation()
    {
        return RegistryError::Conflict(conflict_message.to_string());
    }
    RegistryError::from(err)
}

/// Translates a foreign-key violation into [`RegistryError::Validation`]:
/// a dangling reference in the request is the client's mistake, not a
/// storage failure. Every other error passes through unchanged.
///
/// The referenced-row lookups in the services only exist for friendlier
/// messages; the constraint still catches a row deleted between the
/// lookup and the write, and this is where that error lands.
#[must_use]
pub fn map_foreign_key_violation(err: sqlx::Error, message: &str) -> RegistryError {
    if let sqlx::Error::Database(ref db) = err
        && db.is_foreign_key_violation()
    {
        return RegistryError::Validation(message.to_string());
    }
    RegistryError::from(err)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            RegistryError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RegistryError::NotFound("area").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RegistryError::HasDependents.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RegistryError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RegistryError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_never_leak_detail() {
        let err = RegistryError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn non_constraint_errors_pass_through_violation_mappers() {
        assert!(matches!(
            map_unique_violation(sqlx::Error::PoolTimedOut, "x"),
            RegistryError::Database(_)
        ));
        assert!(matches!(
            map_foreign_key_violation(sqlx::Error::PoolTimedOut, "x"),
            RegistryError::Database(_)
        ));
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(RegistryError::NotFound("beacon").to_string(), "beacon not found");
    }
}
