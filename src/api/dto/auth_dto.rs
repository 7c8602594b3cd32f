//! Request and response DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// `POST /api/auth/register` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Login name. Becomes `username`.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password. Hashed before storage, never persisted.
    pub password: String,
}

/// `POST /api/auth/login` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Sanitized user shape returned by auth endpoints. Never carries the
/// password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    /// User id.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl From<crate::domain::User> for UserDto {
    fn from(user: crate::domain::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Payload of successful register/login responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthData {
    /// The authenticated user, sans credentials.
    pub user: UserDto,
    /// Signed bearer token with a 24-hour expiry.
    pub token: String,
}
