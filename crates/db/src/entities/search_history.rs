//! Search history entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Search history entity.
///
/// Append-only log of the quotes a user has been served, stored as the
/// display string `"{text} — {author}"`. Bulk-deleted per user, either on
/// request or automatically once the user has seen every stored quote.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "search_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User the entry belongs to.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Display string of the served quote.
    #[sea_orm(column_type = "Text")]
    pub query: String,

    /// When the quote was served.
    pub search_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
