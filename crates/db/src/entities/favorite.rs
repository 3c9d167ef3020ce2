//! Favorite entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Favorite entity.
///
/// A user may favorite a given quote at most once; the (quote_id, user_id)
/// unique index enforces it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Quote that was favorited.
    #[sea_orm(indexed)]
    pub quote_id: String,

    /// User who favorited the quote.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// When the favorite was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quote::Entity",
        from = "Column::QuoteId",
        to = "super::quote::Column::Id"
    )]
    Quote,
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
