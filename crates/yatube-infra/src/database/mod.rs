//! Persistence: SeaORM-backed PostgreSQL repositories and in-memory
//! repositories for running without a database.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

/// Entities addressed by a UUID primary key.
pub trait Keyed: Clone + Send + Sync + 'static {
    fn key(&self) -> Uuid;

    /// Name of a unique field this entity shares with `other`, if any.
    fn unique_conflict(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

impl Keyed for User {
    fn key(&self) -> Uuid {
        self.id
    }

    fn unique_conflict(&self, other: &Self) -> Option<&'static str> {
        (self.username == other.username).then_some("username")
    }
}

impl Keyed for Group {
    fn key(&self) -> Uuid {
        self.id
    }

    fn unique_conflict(&self, other: &Self) -> Option<&'static str> {
        (self.slug == other.slug).then_some("slug")
    }
}

impl Keyed for Post {
    fn key(&self) -> Uuid {
        self.id
    }
}

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
