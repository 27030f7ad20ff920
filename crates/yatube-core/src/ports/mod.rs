//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod mail;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenPurpose, TokenService};
pub use mail::{MailError, MailMessage, Mailer};
pub use repository::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};
