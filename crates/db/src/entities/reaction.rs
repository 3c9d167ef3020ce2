//! Quote reaction entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reaction kinds a user can cast on a quote.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    #[sea_orm(string_value = "like")]
    Like,
    #[sea_orm(string_value = "dislike")]
    Dislike,
}

/// Reaction entity.
///
/// At most one live reaction per (quote_id, user_id); switching kinds
/// replaces the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote_reaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Quote the reaction applies to.
    #[sea_orm(indexed)]
    pub quote_id: String,

    /// User who reacted.
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// Whether this is a like or a dislike.
    pub kind: ReactionKind,

    /// When the reaction was cast.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_kind_wire_format() {
        let like: ReactionKind = serde_json::from_str("\"like\"").unwrap();
        assert_eq!(like, ReactionKind::Like);
        assert_eq!(serde_json::to_string(&ReactionKind::Dislike).unwrap(), "\"dislike\"");
    }
}
