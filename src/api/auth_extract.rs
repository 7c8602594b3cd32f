//! Bearer-token extraction for protected routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::error::RegistryError;
use crate::service::Claims;

/// Extractor that requires a valid `Authorization: Bearer <token>`
/// header. Token verification is the sole gate; any missing, malformed,
/// or expired credential rejects the request with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Verified token claims for the authenticated user.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = RegistryError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| RegistryError::Unauthorized("missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| RegistryError::Unauthorized("missing bearer token".to_string()))?;

        let claims = state.auth.tokens().verify(token)?;
        Ok(Self { claims })
    }
}
