use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining the operations every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// All users registered with this email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// Every group, ordered by title.
    async fn list(&self) -> Result<Vec<Group>, RepoError>;
}

/// Which posts a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(Uuid),
    Author(Uuid),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Group(group_id) => post.group_id == Some(*group_id),
            PostFilter::Author(author_id) => post.author_id == *author_id,
        }
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of matching posts, newest first. A page past the end yields
    /// the last page.
    async fn find_page(
        &self,
        filter: PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;
}
