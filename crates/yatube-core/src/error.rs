//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}
