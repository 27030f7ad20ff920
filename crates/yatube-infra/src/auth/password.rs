//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use yatube_core::ports::{AuthError, PasswordService};

/// Argon2id password service producing PHC strings.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        // Users created without a password carry an empty hash and can never log in.
        if hash.is_empty() {
            return Ok(false);
        }

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "war-and-peace";

        let hash = service.hash(password).unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(service.verify(password, &hash).unwrap());
        assert!(!service.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_empty_hash_never_verifies() {
        let service = Argon2PasswordService::new();
        assert!(!service.verify("anything", "").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(
            service.verify("anything", "not-a-phc-string"),
            Err(AuthError::HashingError(_))
        ));
    }
}
