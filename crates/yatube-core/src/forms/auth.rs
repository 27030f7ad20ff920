use serde::{Deserialize, Serialize};

use super::{
    FieldKind, FieldSpec, Form, FormErrors, is_valid_email, messages, required, required_password,
    validate_new_password,
};
use crate::domain::User;

/// Registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Values of a valid [`SignUpForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSignUp {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

impl Form for SignUpForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("first_name", FieldKind::Char, "Имя").optional(),
            FieldSpec::new("last_name", FieldKind::Char, "Фамилия").optional(),
            FieldSpec {
                help_text: "Не более 150 символов. Только буквы, цифры и символы @/./+/-/_.",
                ..FieldSpec::new("username", FieldKind::Char, "Имя пользователя")
            },
            FieldSpec::new("email", FieldKind::Email, "Адрес электронной почты").optional(),
            FieldSpec::new("password1", FieldKind::Password, "Пароль"),
            FieldSpec::new("password2", FieldKind::Password, "Подтверждение пароля"),
        ]
    }

    fn value(&self, field: &str) -> Option<String> {
        match field {
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "username" => Some(self.username.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

impl SignUpForm {
    /// Validate field formats. Username uniqueness needs the user store and
    /// is checked by the caller.
    pub fn clean(&self) -> Result<CleanedSignUp, FormErrors> {
        let mut errors = FormErrors::new();

        let username = required(&mut errors, "username", &self.username);
        if !username.is_empty() && !User::is_valid_username(&username) {
            errors.add("username", messages::INVALID_USERNAME);
        }

        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.add("email", messages::INVALID_EMAIL);
        }

        let password1 = required_password(&mut errors, "password1", &self.password1);
        let password2 = required_password(&mut errors, "password2", &self.password2);
        validate_new_password(&mut errors, &password1, &password2, "password2");

        errors.into_result(CleanedSignUp {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username,
            email: Some(email.to_lowercase()).filter(|e| !e.is_empty()),
            password: password1,
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Form for LoginForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("username", FieldKind::Char, "Имя пользователя"),
            FieldSpec::new("password", FieldKind::Password, "Пароль"),
        ]
    }

    fn value(&self, field: &str) -> Option<String> {
        match field {
            "username" => Some(self.username.clone()),
            _ => None,
        }
    }
}

impl LoginForm {
    /// Returns `(username, password)`.
    pub fn clean(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::new();
        let username = required(&mut errors, "username", &self.username);
        let password = required_password(&mut errors, "password", &self.password);
        errors.into_result((username, password))
    }
}

/// Password change form for a logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

/// Values of a valid [`PasswordChangeForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedPasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl Form for PasswordChangeForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("old_password", FieldKind::Password, "Старый пароль"),
            FieldSpec::new("new_password1", FieldKind::Password, "Новый пароль"),
            FieldSpec::new(
                "new_password2",
                FieldKind::Password,
                "Подтверждение нового пароля",
            ),
        ]
    }

    fn value(&self, _field: &str) -> Option<String> {
        None
    }
}

impl PasswordChangeForm {
    pub fn clean(&self) -> Result<CleanedPasswordChange, FormErrors> {
        let mut errors = FormErrors::new();
        let old_password = required_password(&mut errors, "old_password", &self.old_password);
        let new_password1 = required_password(&mut errors, "new_password1", &self.new_password1);
        let new_password2 = required_password(&mut errors, "new_password2", &self.new_password2);
        validate_new_password(&mut errors, &new_password1, &new_password2, "new_password2");
        errors.into_result(CleanedPasswordChange {
            old_password,
            new_password: new_password1,
        })
    }
}

/// Password reset request form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetForm {
    #[serde(default)]
    pub email: String,
}

impl Form for PasswordResetForm {
    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::new(
            "email",
            FieldKind::Email,
            "Адрес электронной почты",
        )]
    }

    fn value(&self, field: &str) -> Option<String> {
        match field {
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

impl PasswordResetForm {
    pub fn clean(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let email = required(&mut errors, "email", &self.email);
        if !email.is_empty() && !is_valid_email(&email) {
            errors.add("email", messages::INVALID_EMAIL);
        }
        errors.into_result(email)
    }
}

/// New password form reached from a reset link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetPasswordForm {
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

impl Form for SetPasswordForm {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("new_password1", FieldKind::Password, "Новый пароль"),
            FieldSpec::new(
                "new_password2",
                FieldKind::Password,
                "Подтверждение нового пароля",
            ),
        ]
    }

    fn value(&self, _field: &str) -> Option<String> {
        None
    }
}

impl SetPasswordForm {
    pub fn clean(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let new_password1 = required_password(&mut errors, "new_password1", &self.new_password1);
        let new_password2 = required_password(&mut errors, "new_password2", &self.new_password2);
        validate_new_password(&mut errors, &new_password1, &new_password2, "new_password2");
        errors.into_result(new_password1)
    }
}
