//! Forms - bind submitted HTTP input to domain values and collect
//! validation errors.
//!
//! Every form is a plain serde struct whose fields default to empty, so a
//! missing input shows up as a validation error rather than a rejected
//! request. `clean` returns either the typed values or [`FormErrors`].

mod auth;
mod post;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::FieldMeta;

pub use auth::{
    CleanedPasswordChange, CleanedSignUp, LoginForm, PasswordChangeForm, PasswordResetForm,
    SetPasswordForm, SignUpForm,
};
pub use post::{CleanedPost, PostForm};

/// Minimum length of a password.
pub const PASSWORD_MIN_LEN: usize = 8;

pub mod messages {
    pub const REQUIRED: &str = "Обязательное поле.";
    pub const INVALID_CHOICE: &str =
        "Выберите корректный вариант. Вашего варианта нет среди допустимых значений.";
    pub const INVALID_USERNAME: &str = "Введите правильное имя пользователя. Оно может содержать только буквы, цифры и знаки @/./+/-/_.";
    pub const INVALID_EMAIL: &str = "Введите правильный адрес электронной почты.";
    pub const USERNAME_TAKEN: &str = "Пользователь с таким именем уже существует.";
    pub const PASSWORD_MISMATCH: &str = "Введенные пароли не совпадают.";
    pub const PASSWORD_TOO_SHORT: &str =
        "Введённый пароль слишком короткий. Он должен содержать как минимум 8 символов.";
    pub const PASSWORD_NUMERIC: &str = "Введённый пароль состоит только из цифр.";
    pub const INVALID_LOGIN: &str = "Пожалуйста, введите правильные имя пользователя и пароль. Оба поля могут быть чувствительны к регистру.";
    pub const WRONG_OLD_PASSWORD: &str =
        "Ваш старый пароль введен неправильно. Пожалуйста, введите его снова.";
}

/// Kind of input a form field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Char,
    ModelChoice,
    Email,
    Password,
}

/// Description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub help_text: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            label,
            help_text: "",
            required: true,
        }
    }

    /// Field labelled from model metadata.
    pub fn from_meta(meta: &FieldMeta, kind: FieldKind, required: bool) -> Self {
        Self {
            name: meta.name,
            kind,
            label: meta.verbose_name,
            help_text: meta.help_text,
            required,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A form that can describe its fields and echo submitted values back.
pub trait Form {
    fn fields() -> Vec<FieldSpec>;

    /// Submitted value of a field as it should be redisplayed. Password
    /// inputs are never echoed.
    fn value(&self, field: &str) -> Option<String>;
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Ok(value)` when no errors were collected.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Trimmed value of a required text input.
pub(crate) fn required(errors: &mut FormErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, messages::REQUIRED);
    }
    value.to_string()
}

/// Required password input. Passwords are not trimmed.
pub(crate) fn required_password(errors: &mut FormErrors, field: &str, value: &str) -> String {
    if value.is_empty() {
        errors.add(field, messages::REQUIRED);
    }
    value.to_string()
}

/// Check a new password and its confirmation. Errors land on the
/// confirmation field.
pub(crate) fn validate_new_password(
    errors: &mut FormErrors,
    password1: &str,
    password2: &str,
    field: &str,
) {
    if password1.is_empty() || password2.is_empty() {
        return;
    }
    if password1 != password2 {
        errors.add(field, messages::PASSWORD_MISMATCH);
        return;
    }
    if password1.chars().count() < PASSWORD_MIN_LEN {
        errors.add(field, messages::PASSWORD_TOO_SHORT);
    }
    if password1.chars().all(|c| c.is_ascii_digit()) {
        errors.add(field, messages::PASSWORD_NUMERIC);
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_password_rules() {
        let mut errors = FormErrors::new();
        validate_new_password(&mut errors, "secret-pass", "other-pass", "password2");
        assert_eq!(errors.get("password2"), [messages::PASSWORD_MISMATCH]);

        let mut errors = FormErrors::new();
        validate_new_password(&mut errors, "1234", "1234", "password2");
        assert_eq!(
            errors.get("password2"),
            [messages::PASSWORD_TOO_SHORT, messages::PASSWORD_NUMERIC]
        );

        let mut errors = FormErrors::new();
        validate_new_password(&mut errors, "correct horse", "correct horse", "password2");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("leo@example.com"));
        assert!(!is_valid_email("leo"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("leo@localhost"));
        assert!(!is_valid_email("leo @example.com"));
    }
}
