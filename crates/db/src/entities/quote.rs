//! Quote entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quote entity.
///
/// The (text, author) pair is the business key: a unique index guards it
/// and ingestion upserts against that index instead of checking first.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Quote text.
    #[sea_orm(column_type = "Text")]
    pub text: String,

    /// Quote author.
    pub author: String,

    /// Count of live "like" reactions.
    #[sea_orm(default_value = 0)]
    pub likes: i32,

    /// Count of live "dislike" reactions.
    #[sea_orm(default_value = 0)]
    pub dislikes: i32,

    /// When the quote was first stored.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorite,
    #[sea_orm(has_many = "super::reaction::Entity")]
    Reaction,
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorite.def()
    }
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
