//! User records for credential storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered dashboard user.
///
/// Only the bcrypt hash of the password is ever persisted, and the hash
/// is excluded from serialization so it can never leak into a response.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Opaque unique identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Salted bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
