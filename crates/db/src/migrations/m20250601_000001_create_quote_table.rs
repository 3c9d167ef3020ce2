//! Create quote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quote::Text).text().not_null())
                    .col(ColumnDef::new(Quote::Author).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Quote::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quote::Dislikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (text, author) - the business key ingestion upserts against
        manager
            .create_index(
                Index::create()
                    .name("idx_quote_text_author")
                    .table(Quote::Table)
                    .col(Quote::Text)
                    .col(Quote::Author)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quote {
    Table,
    Id,
    Text,
    Author,
    Likes,
    Dislikes,
    CreatedAt,
}
