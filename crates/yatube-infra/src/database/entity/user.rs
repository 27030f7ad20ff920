//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for yatube_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<yatube_core::domain::User> for ActiveModel {
    fn from(user: yatube_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
