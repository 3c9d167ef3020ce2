//! Create quote reaction table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuoteReaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuoteReaction::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuoteReaction::QuoteId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuoteReaction::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuoteReaction::Kind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuoteReaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_reaction_quote")
                            .from(QuoteReaction::Table, QuoteReaction::QuoteId)
                            .to(Quote::Table, Quote::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (quote_id, user_id) - one live reaction per user per quote
        manager
            .create_index(
                Index::create()
                    .name("idx_quote_reaction_quote_user")
                    .table(QuoteReaction::Table)
                    .col(QuoteReaction::QuoteId)
                    .col(QuoteReaction::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's reactions)
        manager
            .create_index(
                Index::create()
                    .name("idx_quote_reaction_user_id")
                    .table(QuoteReaction::Table)
                    .col(QuoteReaction::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuoteReaction::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QuoteReaction {
    Table,
    Id,
    QuoteId,
    UserId,
    Kind,
    CreatedAt,
}

#[derive(Iden)]
enum Quote {
    Table,
    Id,
}
