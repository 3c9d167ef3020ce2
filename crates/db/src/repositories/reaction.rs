//! Quote reaction repository.

use std::sync::Arc;

use crate::entities::{
    Quote, Reaction, quote,
    reaction::{self, ReactionKind},
};
use quotes_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};

/// Reaction repository for database operations.
///
/// Reaction writes also adjust the denormalized like/dislike counters on
/// the quote row, so every mutation here runs as one transaction.
#[derive(Clone)]
pub struct ReactionRepository {
    db: Arc<DatabaseConnection>,
}

impl ReactionRepository {
    /// Create a new reaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a reaction by quote and user.
    pub async fn find_by_quote_and_user(
        &self,
        quote_id: &str,
        user_id: i64,
    ) -> AppResult<Option<reaction::Model>> {
        Reaction::find()
            .filter(reaction::Column::QuoteId.eq(quote_id))
            .filter(reaction::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a first reaction and bump the matching counter.
    pub async fn insert(&self, model: reaction::ActiveModel, kind: ReactionKind) -> AppResult<()> {
        let quote_id = match &model.quote_id {
            sea_orm::ActiveValue::Set(id) => id.clone(),
            _ => return Err(AppError::Internal("reaction without quote id".to_string())),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Self::increment_counter(&txn, &quote_id, kind).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace an existing reaction with one of the opposite kind.
    ///
    /// Deletes the old row, inserts the new one and moves one unit between
    /// the quote's counters, all inside a single transaction.
    pub async fn switch(
        &self,
        old_id: &str,
        model: reaction::ActiveModel,
        new_kind: ReactionKind,
    ) -> AppResult<()> {
        let quote_id = match &model.quote_id {
            sea_orm::ActiveValue::Set(id) => id.clone(),
            _ => return Err(AppError::Internal("reaction without quote id".to_string())),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Reaction::delete_by_id(old_id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let update = match new_kind {
            ReactionKind::Like => Quote::update_many()
                .col_expr(quote::Column::Likes, Expr::col(quote::Column::Likes).add(1))
                .col_expr(
                    quote::Column::Dislikes,
                    Expr::cust("GREATEST(dislikes - 1, 0)"),
                ),
            ReactionKind::Dislike => Quote::update_many()
                .col_expr(
                    quote::Column::Dislikes,
                    Expr::col(quote::Column::Dislikes).add(1),
                )
                .col_expr(quote::Column::Likes, Expr::cust("GREATEST(likes - 1, 0)")),
        };

        update
            .filter(quote::Column::Id.eq(&*quote_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment one reaction counter atomically (single UPDATE query, no fetch).
    async fn increment_counter<C: ConnectionTrait>(
        conn: &C,
        quote_id: &str,
        kind: ReactionKind,
    ) -> AppResult<()> {
        let update = match kind {
            ReactionKind::Like => Quote::update_many().col_expr(
                quote::Column::Likes,
                Expr::col(quote::Column::Likes).add(1),
            ),
            ReactionKind::Dislike => Quote::update_many().col_expr(
                quote::Column::Dislikes,
                Expr::col(quote::Column::Dislikes).add(1),
            ),
        };

        update
            .filter(quote::Column::Id.eq(quote_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
