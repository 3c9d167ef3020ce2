//! Create daily subscriber table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailySubscriber::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailySubscriber::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailySubscriber::ChatId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySubscriber::PreferredTime)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySubscriber::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: chat_id - one subscription per chat
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_subscriber_chat_id")
                    .table(DailySubscriber::Table)
                    .col(DailySubscriber::ChatId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: preferred_time (dispatch selects by exact time match)
        manager
            .create_index(
                Index::create()
                    .name("idx_daily_subscriber_preferred_time")
                    .table(DailySubscriber::Table)
                    .col(DailySubscriber::PreferredTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailySubscriber::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailySubscriber {
    Table,
    Id,
    ChatId,
    PreferredTime,
    CreatedAt,
}
