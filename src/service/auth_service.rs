//! Credential registration, login, and signed bearer tokens.
//!
//! Passwords are stored as salted bcrypt hashes; tokens are HS256 JWTs
//! carrying the user's identity with a bounded lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::dto::{LoginRequest, RegisterRequest};
use crate::domain::User;
use crate::error::{RegistryError, map_unique_violation};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

const USER_EXISTS: &str = "a user with that email or username already exists";

/// Claims embedded in every issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user's id.
    pub user_id: Uuid,
    /// Authenticated user's email.
    pub email: String,
    /// Authenticated user's login name.
    pub username: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch. Tokens older than the configured
    /// TTL (24 hours by default) fail verification.
    pub exp: i64,
}

/// Signs and verifies bearer tokens.
///
/// Verification fails closed: any decode error, signature mismatch, or
/// past expiry is treated as an absent credential.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_hours", &self.ttl_hours)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer from the shared HMAC secret.
    #[must_use]
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Issues a signed token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Internal`] if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, RegistryError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.ttl_hours)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| RegistryError::Internal(format!("token signing failed: {e}")))
    }

    /// Verifies a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any decode failure,
    /// signature mismatch, or expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, RegistryError> {
        jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &jsonwebtoken::Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| RegistryError::Unauthorized("invalid or expired token".to_string()))
    }
}

/// Credential registration, login, and token validation. Independent of
/// the area and beacon registries.
#[derive(Debug)]
pub struct AuthService {
    pool: PgPool,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Creates a new service over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool, tokens: TokenIssuer) -> Self {
        Self { pool, tokens }
    }

    /// Returns the token issuer, for bearer-token extraction.
    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Registers a new user and issues a token.
    ///
    /// Only the bcrypt hash of the password is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for a password shorter than
    /// six characters or missing fields, and [`RegistryError::Conflict`]
    /// when the email or username is already taken.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, String), RegistryError> {
        validate_register(&req)?;

        // Friendly pre-check; the UNIQUE constraints still backstop
        // concurrent registrations.
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1 OR username = $2")
                .bind(&req.email)
                .bind(&req.name)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(RegistryError::Conflict(USER_EXISTS.to_string()));
        }

        let password = req.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            bcrypt::hash(&password, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| RegistryError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| RegistryError::Internal(format!("password hashing failed: {e}")))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(&req.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, USER_EXISTS))?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok((user, token))
    }

    /// Authenticates by email and password, issuing a token on success.
    ///
    /// # Errors
    ///
    /// Returns the same [`RegistryError::InvalidCredentials`] for an
    /// unknown email and a wrong password; the two cases are not
    /// distinguishable from the response.
    pub async fn login(&self, req: LoginRequest) -> Result<(User, String), RegistryError> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(RegistryError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(&req.email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Err(RegistryError::InvalidCredentials);
        };

        let password = req.password;
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
            .await
            .map_err(|e| RegistryError::Internal(format!("verify task failed: {e}")))?
            .map_err(|e| RegistryError::Internal(format!("password verify failed: {e}")))?;

        if !valid {
            return Err(RegistryError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }
}

fn validate_register(req: &RegisterRequest) -> Result<(), RegistryError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(RegistryError::Validation(
            "name, email and password are required".to_string(),
        ));
    }
    if req.password.chars().count() < 6 {
        return Err(RegistryError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "operator".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$irrelevant".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let issuer = TokenIssuer::new("test-secret", 24);
        let user = test_user();
        let Ok(token) = issuer.issue(&user) else {
            panic!("issue must succeed");
        };
        let Ok(claims) = issuer.verify(&token) else {
            panic!("fresh token must verify");
        };
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.username, user.username);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenIssuer::new("secret-a", 24);
        let other = TokenIssuer::new("secret-b", 24);
        let Ok(token) = other.issue(&test_user()) else {
            panic!("issue must succeed");
        };
        assert!(matches!(
            issuer.verify(&token),
            Err(RegistryError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", 24);
        let now = Utc::now();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            username: "operator".to_string(),
            iat: (now - Duration::hours(48)).timestamp(),
            exp: (now - Duration::hours(24)).timestamp(),
        };
        let Ok(token) = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        ) else {
            panic!("encode must succeed");
        };
        assert!(matches!(
            issuer.verify(&token),
            Err(RegistryError::Unauthorized(_))
        ));
    }

    #[test]
    fn garbage_token_fails_closed() {
        let issuer = TokenIssuer::new("test-secret", 24);
        assert!(issuer.verify("not-a-token").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let req = RegisterRequest {
            name: "operator".to_string(),
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
        };
        let Err(RegistryError::Validation(msg)) = validate_register(&req) else {
            panic!("short password must fail");
        };
        assert!(msg.contains("6 characters"));
    }

    #[test]
    fn register_rejects_blank_name() {
        let req = RegisterRequest {
            name: " ".to_string(),
            email: "a@x.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(matches!(
            validate_register(&req),
            Err(RegistryError::Validation(_))
        ));
    }
}
