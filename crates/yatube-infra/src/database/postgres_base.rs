use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};
use uuid::Uuid;

use yatube_core::error::RepoError;
use yatube_core::ports::BaseRepository;

use super::Keyed;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

pub(crate) fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn write_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl<E, T> BaseRepository<T, Uuid> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    T: Keyed + From<E::Model> + Into<E::ActiveModel>,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let exists = E::find_by_id(entity.key())
            .one(&self.db)
            .await
            .map_err(query_error)?
            .is_some();

        let active_model: E::ActiveModel = entity.into();
        let model = if exists {
            active_model.update(&self.db).await
        } else {
            active_model.insert(&self.db).await
        }
        .map_err(write_error)?;

        Ok(model.into())
    }
}
