//! Authentication ports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::User;

/// What a signed token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    PasswordReset,
}

/// Claims carried by a validated token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub purpose: TokenPurpose,
    /// `updated_at` of the user when the token was issued, in microseconds.
    pub stamp: i64,
}

impl TokenClaims {
    /// Whether the user has not changed since the token was issued.
    pub fn matches(&self, user: &User) -> bool {
        self.user_id == user.id && self.stamp == user.updated_at.timestamp_micros()
    }
}

/// Token service for session and password reset tokens.
pub trait TokenService: Send + Sync {
    fn generate_token(&self, user: &User, purpose: TokenPurpose) -> Result<String, AuthError>;

    /// Validate a token and check it was issued for `purpose`.
    fn validate_token(&self, token: &str, purpose: TokenPurpose)
    -> Result<TokenClaims, AuthError>;

    /// Lifetime of tokens issued for `purpose`.
    fn expiration_seconds(&self, purpose: TokenPurpose) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
