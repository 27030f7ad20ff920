//! Session authentication: the session cookie, the identity extractor and the
//! login redirect for anonymous visitors.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use uuid::Uuid;

use yatube_core::domain::User;
use yatube_core::ports::TokenPurpose;

use crate::middleware::error::AppError;
use crate::state::AppState;
use crate::urls;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Authenticated user identity extractor.
///
/// Handlers taking an `Identity` are login-gated: anonymous requests are
/// redirected to the login page with the original path in `next`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}

/// Rejection for anonymous access to a gated page.
#[derive(Debug)]
pub struct LoginRequired {
    pub next: String,
}

impl LoginRequired {
    fn for_request(req: &HttpRequest) -> Self {
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.path());
        Self {
            next: next.to_string(),
        }
    }
}

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login required to access {}", self.next)
    }
}

impl actix_web::ResponseError for LoginRequired {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, urls::login_with_next(&self.next)))
            .finish()
    }
}

/// Session token from the cookie, or a Bearer token from the
/// Authorization header.
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolve the session of a request to its user. Tokens issued before the
/// user's last password change no longer authenticate.
async fn authenticate(req: &HttpRequest) -> Result<Option<Identity>, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AppError::Internal("AppState not found in app data".to_string()));
    };

    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    let claims = match state.tokens.validate_token(&token, TokenPurpose::Session) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            return Ok(None);
        }
    };

    match state.users.find_by_id(claims.user_id).await? {
        Some(user) if claims.matches(&user) => Ok(Some(Identity::from(user))),
        Some(_) => {
            tracing::debug!(
                user_id = %claims.user_id,
                "Ignoring session issued before a password change"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            match authenticate(&req).await? {
                Some(identity) => Ok(identity),
                None => Err(LoginRequired::for_request(&req).into()),
            }
        })
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that clears the session on the client.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_required_redirects_with_next() {
        use actix_web::ResponseError;

        let err = LoginRequired {
            next: "/posts/1/edit/".to_string(),
        };
        let response = err.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login/?next=/posts/1/edit/"
        );
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
