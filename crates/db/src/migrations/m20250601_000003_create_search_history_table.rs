//! Create search history table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchHistory::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchHistory::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SearchHistory::Query).text().not_null())
                    .col(
                        ColumnDef::new(SearchHistory::SearchDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (history is always scoped to one user)
        manager
            .create_index(
                Index::create()
                    .name("idx_search_history_user_id")
                    .table(SearchHistory::Table)
                    .col(SearchHistory::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: search_date (recent-first listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_search_history_search_date")
                    .table(SearchHistory::Table)
                    .col(SearchHistory::SearchDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SearchHistory {
    Table,
    Id,
    UserId,
    Query,
    SearchDate,
}
