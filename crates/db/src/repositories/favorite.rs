//! Favorite repository.

use std::sync::Arc;

use crate::entities::{Favorite, Quote, favorite, quote};
use quotes_common::{AppError, AppResult};
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};

/// One row of the cross-user favorite ranking.
#[derive(Debug, FromQueryResult)]
struct FavoriteCount {
    quote_id: String,
    favorites: i64,
}

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a favorite through the (quote_id, user_id) unique index.
    ///
    /// A conflicting row means the user already favorited the quote.
    pub async fn insert(&self, model: favorite::ActiveModel) -> AppResult<()> {
        let insert = Favorite::insert(model).on_conflict(
            OnConflict::columns([favorite::Column::QuoteId, favorite::Column::UserId])
                .do_nothing()
                .to_owned(),
        );

        match insert.exec(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotInserted) => Err(AppError::Conflict(
                "Quote is already in favorites".to_string(),
            )),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Get a user's favorites joined with their quotes, oldest first.
    pub async fn find_by_user_with_quotes(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<(favorite::Model, Option<quote::Model>)>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_asc(favorite::Column::Id)
            .find_also_related(Quote)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a favorite by quote and user.
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete_by_quote_and_user(&self, quote_id: &str, user_id: i64) -> AppResult<bool> {
        let result = Favorite::delete_many()
            .filter(favorite::Column::QuoteId.eq(quote_id))
            .filter(favorite::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Rank quotes by favorite count across all users.
    ///
    /// Returns (quote_id, favorite count) pairs, most favorited first.
    pub async fn top_favorited(&self, limit: u64) -> AppResult<Vec<(String, i64)>> {
        let rows = Favorite::find()
            .select_only()
            .column(favorite::Column::QuoteId)
            .column_as(favorite::Column::Id.count(), "favorites")
            .group_by(favorite::Column::QuoteId)
            .order_by_desc(Expr::col(Alias::new("favorites")))
            .limit(limit)
            .into_model::<FavoriteCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| (r.quote_id, r.favorites)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_favorite(id: &str, quote_id: &str, user_id: i64) -> favorite::Model {
        favorite::Model {
            id: id.to_string(),
            quote_id: quote_id.to_string(),
            user_id,
            created_at: Utc::now().into(),
        }
    }

    fn active_model(id: &str, quote_id: &str, user_id: i64) -> favorite::ActiveModel {
        favorite::ActiveModel {
            id: Set(id.to_string()),
            quote_id: Set(quote_id.to_string()),
            user_id: Set(user_id),
            created_at: Set(Utc::now().into()),
        }
    }

    #[tokio::test]
    async fn test_insert() {
        let fav = create_test_favorite("fav1", "q1", 1);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[fav]])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        assert!(repo.insert(active_model("fav1", "q1", 1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_duplicate_is_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<favorite::Model>::new()])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let result = repo.insert(active_model("fav2", "q1", 1)).await;

        match result {
            Err(AppError::Conflict(_)) => {}
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_delete_by_quote_and_user_reports_missing_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let removed = repo.delete_by_quote_and_user("q1", 1).await.unwrap();

        assert!(!removed);
    }

    #[tokio::test]
    async fn test_top_favorited() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    maplit::btreemap! {
                        "quote_id" => sea_orm::Value::from("q1"),
                        "favorites" => sea_orm::Value::BigInt(Some(4)),
                    },
                    maplit::btreemap! {
                        "quote_id" => sea_orm::Value::from("q2"),
                        "favorites" => sea_orm::Value::BigInt(Some(2)),
                    },
                ]])
                .into_connection(),
        );

        let repo = FavoriteRepository::new(db);
        let top = repo.top_favorited(5).await.unwrap();

        assert_eq!(top, vec![("q1".to_string(), 4), ("q2".to_string(), 2)]);
    }
}
