//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use yatube_core::domain::{Group, Post, User};
use yatube_core::error::RepoError;
use yatube_core::pagination::{Page, PageRequest};
use yatube_core::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        // Emails are stored lowercased at registration.
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .order_by_asc(group::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn condition(filter: PostFilter) -> Condition {
    match filter {
        PostFilter::All => Condition::all(),
        PostFilter::Group(group_id) => Condition::all().add(post::Column::GroupId.eq(group_id)),
        PostFilter::Author(author_id) => {
            Condition::all().add(post::Column::AuthorId.eq(author_id))
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = PostEntity::find()
            .filter(condition(filter))
            .order_by_desc(post::Column::PubDate)
            .order_by_asc(post::Column::Id)
            .paginate(&self.db, request.per_page);

        let total = paginator.num_items().await.map_err(query_error)?;
        let request = request.clamp(total);
        let models = paginator
            .fetch_page(request.index())
            .await
            .map_err(query_error)?;

        tracing::debug!(?filter, page = request.number, total, "Fetched post page");

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(condition(filter))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}
