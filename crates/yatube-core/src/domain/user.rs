use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a username.
pub const USERNAME_MAX_LEN: usize = 150;

/// User entity - a registered author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Current time at the microsecond precision storage keeps.
fn current_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = current_time();
        Self {
            id: Uuid::new_v4(),
            username,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_names(mut self, first_name: String, last_name: String) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.filter(|e| !e.is_empty());
        self
    }

    /// First and last name separated by a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Replace the password hash. Bumps `updated_at`, which invalidates
    /// outstanding sessions and password reset tokens.
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = current_time();
    }

    /// Letters, digits and `@.+-_` only, at most 150 characters.
    pub fn is_valid_username(username: &str) -> bool {
        !username.is_empty()
            && username.chars().count() <= USERNAME_MAX_LEN
            && username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
