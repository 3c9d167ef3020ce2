//! Search history repository.

use std::sync::Arc;

use crate::entities::{SearchHistory, search_history};
use quotes_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Search history repository for database operations.
#[derive(Clone)]
pub struct SearchHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SearchHistoryRepository {
    /// Create a new search history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Check whether the user already has an entry with this query string.
    pub async fn exists(&self, user_id: i64, query: &str) -> AppResult<bool> {
        let found = SearchHistory::find()
            .filter(search_history::Column::UserId.eq(user_id))
            .filter(search_history::Column::Query.eq(query))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Append a history entry.
    pub async fn create(
        &self,
        model: search_history::ActiveModel,
    ) -> AppResult<search_history::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's most recent entries, newest first.
    pub async fn find_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> AppResult<Vec<search_history::Model>> {
        SearchHistory::find()
            .filter(search_history::Column::UserId.eq(user_id))
            .order_by_desc(search_history::Column::SearchDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a user's history entries.
    pub async fn count_by_user(&self, user_id: i64) -> AppResult<u64> {
        SearchHistory::find()
            .filter(search_history::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete all of a user's history entries.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_by_user(&self, user_id: i64) -> AppResult<u64> {
        let result = SearchHistory::delete_many()
            .filter(search_history::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_entry(id: &str, user_id: i64, query: &str) -> search_history::Model {
        search_history::Model {
            id: id.to_string(),
            user_id,
            query: query.to_string(),
            search_date: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_exists_true() {
        let entry = create_test_entry("h1", 1, "Be brave — X");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[entry]])
                .into_connection(),
        );

        let repo = SearchHistoryRepository::new(db);
        assert!(repo.exists(1, "Be brave — X").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<search_history::Model>::new()])
                .into_connection(),
        );

        let repo = SearchHistoryRepository::new(db);
        assert!(!repo.exists(1, "Be brave — X").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_recent() {
        let newer = create_test_entry("h2", 1, "Second — Y");
        let older = create_test_entry("h1", 1, "First — X");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[newer, older]])
                .into_connection(),
        );

        let repo = SearchHistoryRepository::new(db);
        let result = repo.find_recent(1, 5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].query, "Second — Y");
    }

    #[tokio::test]
    async fn test_delete_by_user_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                }])
                .into_connection(),
        );

        let repo = SearchHistoryRepository::new(db);
        let removed = repo.delete_by_user(1).await.unwrap();

        assert_eq!(removed, 3);
    }
}
