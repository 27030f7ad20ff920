//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub pub_date: DateTimeWithTimeZone,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Group,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for yatube_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            pub_date: model.pub_date.into(),
            author_id: model.author_id,
            group_id: model.group_id,
        }
    }
}

impl From<yatube_core::domain::Post> for ActiveModel {
    fn from(post: yatube_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            text: Set(post.text),
            pub_date: Set(post.pub_date.into()),
            author_id: Set(post.author_id),
            group_id: Set(post.group_id),
        }
    }
}
