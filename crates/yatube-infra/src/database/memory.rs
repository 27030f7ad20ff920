//! In-memory repositories - used when no database is configured and in tests.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};
use yatube_core::error::RepoError;
use yatube_core::pagination::{Page, PageRequest};
use yatube_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};

use super::Keyed;

/// Entity store keyed by id, guarded by an async RwLock.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryGroupRepository = InMemoryRepository<Group>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> InMemoryRepository<T> {
    async fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let store = self.store.read().await;
        store.values().filter(|e| predicate(*e)).cloned().collect()
    }
}

#[async_trait]
impl<T: Keyed> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        let id = entity.key();
        if let Some(field) = store
            .values()
            .filter(|other| other.key() != id)
            .find_map(|other| entity.unique_conflict(other))
        {
            return Err(RepoError::Constraint(format!("{field} already exists")));
        }

        store.insert(id, entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .filtered(|u| u.username == username)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        Ok(self
            .filtered(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .await)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        Ok(self.filtered(|g| g.slug == slug).await.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let mut groups = self.filtered(|_| true).await;
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let mut posts = self.filtered(|p| filter.matches(p)).await;
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then_with(|| a.id.cmp(&b.id)));
        Ok(Page::from_vec(posts, request))
    }

    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| filter.matches(p)).count() as u64)
    }
}
