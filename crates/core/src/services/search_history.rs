//! Search history service.

use quotes_common::{AppError, AppResult};
use quotes_db::{entities::search_history, repositories::SearchHistoryRepository};

/// How many entries the history listing returns.
const RECENT_LIMIT: u64 = 5;

/// Search history service.
#[derive(Clone)]
pub struct SearchHistoryService {
    history_repo: SearchHistoryRepository,
}

impl SearchHistoryService {
    /// Create a new search history service.
    #[must_use]
    pub const fn new(history_repo: SearchHistoryRepository) -> Self {
        Self { history_repo }
    }

    /// The user's five most recent entries, newest first.
    pub async fn recent(&self, user_id: i64) -> AppResult<Vec<search_history::Model>> {
        let entries = self.history_repo.find_recent(user_id, RECENT_LIMIT).await?;
        if entries.is_empty() {
            return Err(AppError::NotFound("Search history is empty".to_string()));
        }
        Ok(entries)
    }

    /// Delete all of the user's history.
    ///
    /// Returns the number of entries removed.
    pub async fn clear(&self, user_id: i64) -> AppResult<u64> {
        let removed = self.history_repo.delete_by_user(user_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound(
                "No search history to clear".to_string(),
            ));
        }
        tracing::debug!(user_id, removed, "Cleared search history");
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_entry(id: &str, user_id: i64, query: &str) -> search_history::Model {
        search_history::Model {
            id: id.to_string(),
            user_id,
            query: query.to_string(),
            search_date: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_recent_empty_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<search_history::Model>::new()])
                .into_connection(),
        );

        let service = SearchHistoryService::new(SearchHistoryRepository::new(db));

        let result = service.recent(1).await;
        match result {
            Err(AppError::NotFound(_)) => {}
            _ => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_recent_returns_entries() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_entry("h2", 1, "Second — Y"),
                    create_test_entry("h1", 1, "First — X"),
                ]])
                .into_connection(),
        );

        let service = SearchHistoryService::new(SearchHistoryRepository::new(db));

        let entries = service.recent(1).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query, "Second — Y");
    }

    #[tokio::test]
    async fn test_clear_nothing_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let service = SearchHistoryService::new(SearchHistoryRepository::new(db));

        let result = service.clear(1).await;
        match result {
            Err(AppError::NotFound(_)) => {}
            _ => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_clear_reports_removed_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 4,
                }])
                .into_connection(),
        );

        let service = SearchHistoryService::new(SearchHistoryRepository::new(db));

        let removed = service.clear(1).await.unwrap();
        assert_eq!(removed, 4);
    }
}
