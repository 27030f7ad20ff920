//! Account pages: sign-up, login, logout, password change and reset.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::domain::User;
use yatube_core::error::{DomainError, RepoError};
use yatube_core::forms::{
    Form, FormErrors, LoginForm, PasswordChangeForm, PasswordResetForm, SetPasswordForm,
    SignUpForm, messages,
};
use yatube_core::ports::{MailMessage, TokenPurpose};

use crate::middleware::auth::{Identity, removal_cookie, session_cookie};
use crate::middleware::error::AppResult;
use crate::render::{Template, redirect};
use crate::state::AppState;
use crate::{urls, views};

const SIGNUP_TEMPLATE: &str = "users/signup.html";
const LOGIN_TEMPLATE: &str = "users/login.html";
const LOGGED_OUT_TEMPLATE: &str = "users/logged_out.html";
const PASSWORD_CHANGE_TEMPLATE: &str = "users/password_change_form.html";
const PASSWORD_CHANGE_DONE_TEMPLATE: &str = "users/password_change_done.html";
const PASSWORD_RESET_TEMPLATE: &str = "users/password_reset_form.html";
const PASSWORD_RESET_DONE_TEMPLATE: &str = "users/password_reset_done.html";
const PASSWORD_RESET_CONFIRM_TEMPLATE: &str = "users/password_reset_confirm.html";
const PASSWORD_RESET_COMPLETE_TEMPLATE: &str = "users/password_reset_complete.html";

const RESET_SUBJECT: &str = "Сброс пароля на Yatube";

/// Where to go after logging in.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

impl NextQuery {
    fn safe_next(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| urls::is_safe_next(next))
    }
}

fn form_page<F: Form>(
    template: &'static str,
    form: &F,
    bound: bool,
    errors: Option<&FormErrors>,
) -> AppResult<Template> {
    Template::new(template).with("form", views::form_view(form, bound, errors, &[]))
}

/// Redirect carrying a fresh session cookie for `user`.
fn start_session(state: &AppState, user: &User, location: &str) -> AppResult<HttpResponse> {
    let token = state.tokens.generate_token(user, TokenPurpose::Session)?;
    let cookie = session_cookie(
        token,
        state.tokens.expiration_seconds(TokenPurpose::Session),
        state.settings.secure_cookies,
    );

    Ok(HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, location))
        .cookie(cookie)
        .finish())
}

/// GET /auth/signup/
pub async fn signup_form() -> AppResult<HttpResponse> {
    Ok(form_page(SIGNUP_TEMPLATE, &SignUpForm::default(), false, None)?.render())
}

/// Register, log the new user in and send them to the index.
///
/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<SignUpForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let mut cleaned = form.clean();
    if let Ok(values) = &cleaned {
        if state.users.find_by_username(&values.username).await?.is_some() {
            let mut errors = FormErrors::new();
            errors.add("username", messages::USERNAME_TAKEN);
            cleaned = Err(errors);
        }
    }

    let cleaned = match cleaned {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            return Ok(form_page(SIGNUP_TEMPLATE, &form, true, Some(&errors))?.render());
        }
    };

    let password_hash = state.passwords.hash(&cleaned.password)?;
    let user = User::new(cleaned.username, password_hash)
        .with_names(cleaned.first_name, cleaned.last_name)
        .with_email(cleaned.email);

    let user = match state.users.save(user).await {
        Ok(user) => user,
        Err(RepoError::Constraint(_)) => {
            let mut errors = FormErrors::new();
            errors.add("username", messages::USERNAME_TAKEN);
            return Ok(form_page(SIGNUP_TEMPLATE, &form, true, Some(&errors))?.render());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    start_session(&state, &user, urls::INDEX)
}

/// GET /auth/login/
pub async fn login_form(query: web::Query<NextQuery>) -> AppResult<HttpResponse> {
    Ok(form_page(LOGIN_TEMPLATE, &LoginForm::default(), false, None)?
        .with("next", query.safe_next())?
        .render())
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let rejected = |errors: FormErrors| -> AppResult<HttpResponse> {
        Ok(form_page(LOGIN_TEMPLATE, &form, true, Some(&errors))?
            .with("next", query.safe_next())?
            .render())
    };

    let (username, password) = match form.clean() {
        Ok(credentials) => credentials,
        Err(errors) => return rejected(errors),
    };

    let user = match state.users.find_by_username(&username).await? {
        Some(user) if state.passwords.verify(&password, &user.password_hash)? => user,
        _ => {
            tracing::debug!(username = %username, "Login failed");
            let mut errors = FormErrors::new();
            errors.add_non_field(messages::INVALID_LOGIN);
            return rejected(errors);
        }
    };

    tracing::info!(user_id = %user.id, "User logged in");
    start_session(&state, &user, query.safe_next().unwrap_or(urls::INDEX))
}

/// GET|POST /auth/logout/
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::info!(user_id = %identity.user_id, "User logged out");
    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(Template::new(LOGGED_OUT_TEMPLATE).into_response())
}

/// GET /auth/password_change/
pub async fn password_change_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(form_page(
        PASSWORD_CHANGE_TEMPLATE,
        &PasswordChangeForm::default(),
        false,
        None,
    )?
    .render())
}

/// POST /auth/password_change/
pub async fn password_change(
    identity: Identity,
    state: web::Data<AppState>,
    form: web::Form<PasswordChangeForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", identity.user_id))?;

    let mut cleaned = form.clean();
    if let Ok(values) = &cleaned {
        if !state.passwords.verify(&values.old_password, &user.password_hash)? {
            let mut errors = FormErrors::new();
            errors.add("old_password", messages::WRONG_OLD_PASSWORD);
            cleaned = Err(errors);
        }
    }

    let cleaned = match cleaned {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            return Ok(form_page(PASSWORD_CHANGE_TEMPLATE, &form, true, Some(&errors))?.render());
        }
    };

    user.set_password_hash(state.passwords.hash(&cleaned.new_password)?);
    let user = state.users.save(user).await?;

    tracing::info!(user_id = %user.id, "Password changed");
    start_session(&state, &user, urls::PASSWORD_CHANGE_DONE)
}

/// GET /auth/password_change/done/
pub async fn password_change_done(_identity: Identity) -> HttpResponse {
    Template::new(PASSWORD_CHANGE_DONE_TEMPLATE).render()
}

/// GET /auth/password_reset/
pub async fn password_reset_form() -> AppResult<HttpResponse> {
    Ok(form_page(
        PASSWORD_RESET_TEMPLATE,
        &PasswordResetForm::default(),
        false,
        None,
    )?
    .render())
}

/// Mail a reset link to every account with the given address. The response
/// is the same whether or not one exists.
///
/// POST /auth/password_reset/
pub async fn password_reset(
    state: web::Data<AppState>,
    form: web::Form<PasswordResetForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let email = match form.clean() {
        Ok(email) => email,
        Err(errors) => {
            return Ok(form_page(PASSWORD_RESET_TEMPLATE, &form, true, Some(&errors))?.render());
        }
    };

    for user in state.users.find_by_email(&email).await? {
        let Some(to) = user.email.clone() else {
            continue;
        };
        let token = state.tokens.generate_token(&user, TokenPurpose::PasswordReset)?;
        let link = format!(
            "{}{}",
            state.settings.site_url,
            urls::password_reset_confirm(user.id, &token)
        );

        state
            .mailer
            .send(MailMessage {
                to,
                subject: RESET_SUBJECT.to_string(),
                body: format!(
                    "Вы получили это письмо, потому что запросили сброс пароля для пользователя {} на Yatube.\n\nПерейдите по ссылке, чтобы задать новый пароль:\n{link}\n",
                    user.username
                ),
            })
            .await?;
        tracing::info!(user_id = %user.id, "Password reset link sent");
    }

    Ok(redirect(urls::PASSWORD_RESET_DONE))
}

/// GET /auth/password_reset/done/
pub async fn password_reset_done() -> HttpResponse {
    Template::new(PASSWORD_RESET_DONE_TEMPLATE).render()
}

/// User a reset link was issued for, if the link is still good.
async fn reset_link_user(state: &AppState, uid: &str, token: &str) -> AppResult<Option<User>> {
    let Ok(user_id) = Uuid::parse_str(uid) else {
        return Ok(None);
    };
    let claims = match state.tokens.validate_token(token, TokenPurpose::PasswordReset) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected password reset token");
            return Ok(None);
        }
    };
    if claims.user_id != user_id {
        return Ok(None);
    }

    Ok(state
        .users
        .find_by_id(user_id)
        .await?
        .filter(|user| claims.matches(user)))
}

fn reset_confirm_page(
    form: Option<(&SetPasswordForm, bool, Option<&FormErrors>)>,
) -> AppResult<HttpResponse> {
    let page =
        Template::new(PASSWORD_RESET_CONFIRM_TEMPLATE).with("validlink", form.is_some())?;
    let page = match form {
        Some((form, bound, errors)) => {
            page.with("form", views::form_view(form, bound, errors, &[]))?
        }
        None => page.with("form", serde_json::Value::Null)?,
    };
    Ok(page.render())
}

/// GET /auth/reset/{uid}/{token}/
pub async fn password_reset_confirm_form(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (uid, token) = path.into_inner();
    let valid = reset_link_user(&state, &uid, &token).await?.is_some();

    let form = SetPasswordForm::default();
    reset_confirm_page(valid.then_some((&form, false, None)))
}

/// POST /auth/reset/{uid}/{token}/
pub async fn password_reset_confirm(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    form: web::Form<SetPasswordForm>,
) -> AppResult<HttpResponse> {
    let (uid, token) = path.into_inner();
    let Some(mut user) = reset_link_user(&state, &uid, &token).await? else {
        return reset_confirm_page(None);
    };

    let form = form.into_inner();
    let password = match form.clean() {
        Ok(password) => password,
        Err(errors) => return reset_confirm_page(Some((&form, true, Some(&errors)))),
    };

    user.set_password_hash(state.passwords.hash(&password)?);
    let user = state.users.save(user).await?;

    tracing::info!(user_id = %user.id, "Password reset");
    Ok(redirect(urls::PASSWORD_RESET_COMPLETE))
}

/// GET /auth/reset/done/
pub async fn password_reset_complete() -> AppResult<HttpResponse> {
    Ok(Template::new(PASSWORD_RESET_COMPLETE_TEMPLATE)
        .with("login_url", urls::LOGIN)?
        .render())
}
