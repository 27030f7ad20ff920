//! Signed session and password reset tokens.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yatube_core::domain::User;
use yatube_core::ports::{AuthError, TokenClaims, TokenPurpose, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub session_hours: i64,
    pub reset_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            session_hours: 24,
            reset_hours: 72,
            issuer: "yatube".to_string(),
        }
    }
}

impl JwtConfig {
    /// Load from `JWT_SECRET`, `JWT_EXPIRATION_HOURS`, `RESET_EXPIRATION_HOURS`
    /// and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            session_hours: env_hours("JWT_EXPIRATION_HOURS", defaults.session_hours),
            reset_hours: env_hours("RESET_EXPIRATION_HOURS", defaults.reset_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

fn env_hours(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Wire form of the claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    purpose: TokenPurpose,
    stamp: i64,
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user: &User, purpose: TokenPurpose) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::seconds(self.expiration_seconds(purpose));

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            purpose,
            stamp: user.updated_at.timestamp_micros(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let claims = token_data.claims;
        if claims.purpose != purpose {
            return Err(AuthError::InvalidToken(format!(
                "token issued for {:?}",
                claims.purpose
            )));
        }

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: claims.username,
            purpose: claims.purpose,
            stamp: claims.stamp,
        })
    }

    fn expiration_seconds(&self, purpose: TokenPurpose) -> i64 {
        let hours = match purpose {
            TokenPurpose::Session => self.config.session_hours,
            TokenPurpose::PasswordReset => self.config.reset_hours,
        };
        hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            session_hours: 1,
            reset_hours: 2,
            issuer: "test-issuer".to_string(),
        }
    }

    fn user() -> User {
        User::new("testAuthor".to_string(), "hash".to_string())
    }

    #[test]
    fn test_session_token_round_trip() {
        let service = JwtTokenService::new(test_config());
        let user = user();

        let token = service.generate_token(&user, TokenPurpose::Session).unwrap();
        let claims = service.validate_token(&token, TokenPurpose::Session).unwrap();

        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.username, "testAuthor");
        assert!(claims.matches(&user));
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token", TokenPurpose::Session);

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_purpose_is_enforced() {
        let service = JwtTokenService::new(test_config());
        let token = service
            .generate_token(&user(), TokenPurpose::Session)
            .unwrap();

        let result = service.validate_token(&token, TokenPurpose::PasswordReset);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1
            .generate_token(&user(), TokenPurpose::Session)
            .unwrap();

        assert!(service2.validate_token(&token, TokenPurpose::Session).is_err());
    }

    #[test]
    fn test_reset_token_stops_matching_after_password_change() {
        let service = JwtTokenService::new(test_config());
        let mut user = user();

        let token = service
            .generate_token(&user, TokenPurpose::PasswordReset)
            .unwrap();
        user.updated_at += TimeDelta::seconds(1);

        let claims = service
            .validate_token(&token, TokenPurpose::PasswordReset)
            .unwrap();
        assert!(!claims.matches(&user));
    }

    #[test]
    fn test_expiration_seconds() {
        let service = JwtTokenService::new(test_config());

        assert_eq!(service.expiration_seconds(TokenPurpose::Session), 3600);
        assert_eq!(service.expiration_seconds(TokenPurpose::PasswordReset), 7200);
    }
}
