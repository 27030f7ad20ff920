//! # Yatube Infrastructure
//!
//! Concrete implementations of the ports defined in `yatube-core`:
//! PostgreSQL and in-memory repositories, password hashing, signed tokens
//! and mail delivery.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database driver, in-memory storage only
//! - `postgres` - PostgreSQL support via SeaORM

pub mod auth;
pub mod database;
pub mod mail;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};
pub use mail::{InMemoryMailer, LogMailer};

#[cfg(feature = "postgres")]
pub use database::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};
