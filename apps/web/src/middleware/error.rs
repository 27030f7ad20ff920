//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use yatube_shared::ErrorResponse;

use yatube_core::error::{DomainError, RepoError};
use yatube_core::ports::{AuthError, MailError};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} {} not found", entity_type, key))
            }
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
