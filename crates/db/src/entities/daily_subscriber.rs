//! Daily subscriber entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily subscriber entity.
///
/// One row per Telegram chat registered for the daily quote push.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_subscriber")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Telegram chat to deliver to.
    #[sea_orm(unique)]
    pub chat_id: i64,

    /// Preferred delivery time as an "HH:mm" string, matched exactly by
    /// the dispatch endpoint.
    pub preferred_time: String,

    /// When the subscription was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
