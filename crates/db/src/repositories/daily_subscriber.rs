//! Daily subscriber repository.

use std::sync::Arc;

use crate::entities::{DailySubscriber, daily_subscriber};
use quotes_common::{AppError, AppResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Daily subscriber repository for database operations.
#[derive(Clone)]
pub struct DailySubscriberRepository {
    db: Arc<DatabaseConnection>,
}

impl DailySubscriberRepository {
    /// Create a new daily subscriber repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a subscriber through the chat_id unique index.
    pub async fn insert(&self, model: daily_subscriber::ActiveModel) -> AppResult<()> {
        let insert = DailySubscriber::insert(model).on_conflict(
            OnConflict::column(daily_subscriber::Column::ChatId)
                .do_nothing()
                .to_owned(),
        );

        match insert.exec(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotInserted) => {
                Err(AppError::Conflict("Chat is already subscribed".to_string()))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Remove a subscriber by chat.
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete_by_chat_id(&self, chat_id: i64) -> AppResult<bool> {
        let result = DailySubscriber::delete_many()
            .filter(daily_subscriber::Column::ChatId.eq(chat_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Get all subscribers with this exact preferred time.
    pub async fn find_by_time(&self, time: &str) -> AppResult<Vec<daily_subscriber::Model>> {
        DailySubscriber::find()
            .filter(daily_subscriber::Column::PreferredTime.eq(time))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_subscriber(id: &str, chat_id: i64, time: &str) -> daily_subscriber::Model {
        daily_subscriber::Model {
            id: id.to_string(),
            chat_id,
            preferred_time: time.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn active_model(id: &str, chat_id: i64, time: &str) -> daily_subscriber::ActiveModel {
        daily_subscriber::ActiveModel {
            id: Set(id.to_string()),
            chat_id: Set(chat_id),
            preferred_time: Set(time.to_string()),
            created_at: Set(Utc::now().into()),
        }
    }

    #[tokio::test]
    async fn test_insert_duplicate_chat_is_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<daily_subscriber::Model>::new()])
                .into_connection(),
        );

        let repo = DailySubscriberRepository::new(db);
        let result = repo.insert(active_model("s1", 42, "08:00")).await;

        match result {
            Err(AppError::Conflict(_)) => {}
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_delete_by_chat_id_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = DailySubscriberRepository::new(db);
        let removed = repo.delete_by_chat_id(42).await.unwrap();

        assert!(!removed);
    }

    #[tokio::test]
    async fn test_find_by_time_matches_exact_string() {
        let sub = create_test_subscriber("s1", 42, "08:00");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[sub]])
                .into_connection(),
        );

        let repo = DailySubscriberRepository::new(db);
        let result = repo.find_by_time("08:00").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].chat_id, 42);
    }
}
