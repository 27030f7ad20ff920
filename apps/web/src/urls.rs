//! URL reversing for redirects and links.

use uuid::Uuid;

pub const INDEX: &str = "/";
pub const LOGIN: &str = "/auth/login/";
pub const POST_CREATE: &str = "/create/";
pub const PASSWORD_CHANGE_DONE: &str = "/auth/password_change/done/";
pub const PASSWORD_RESET_DONE: &str = "/auth/password_reset/done/";
pub const PASSWORD_RESET_COMPLETE: &str = "/auth/reset/done/";

pub fn group_list(slug: &str) -> String {
    format!("/group/{slug}/")
}

pub fn profile(username: &str) -> String {
    format!("/profile/{}/", quote(username))
}

pub fn post_detail(post_id: Uuid) -> String {
    format!("/posts/{post_id}/")
}

pub fn post_edit(post_id: Uuid) -> String {
    format!("/posts/{post_id}/edit/")
}

pub fn password_reset_confirm(user_id: Uuid, token: &str) -> String {
    format!("/auth/reset/{user_id}/{token}/")
}

/// Login page that sends the user on to `next` afterwards.
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", quote(next))
}

/// Percent-encode a path, keeping `/` readable.
pub fn quote(path: &str) -> String {
    urlencoding::encode(path).replace("%2F", "/")
}

/// Only local absolute paths are followed after login.
pub fn is_safe_next(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}
