//! Quote repository.

use std::sync::Arc;

use crate::entities::{Quote, quote};
use quotes_common::{AppError, AppResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

/// Quote repository for database operations.
#[derive(Clone)]
pub struct QuoteRepository {
    db: Arc<DatabaseConnection>,
}

impl QuoteRepository {
    /// Create a new quote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a quote by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<quote::Model>> {
        Quote::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a quote by ID, failing if it does not exist.
    pub async fn get_by_id(&self, id: &str) -> AppResult<quote::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::QuoteNotFound(id.to_string()))
    }

    /// Find a quote by its (text, author) business key.
    pub async fn find_by_text_and_author(
        &self,
        text: &str,
        author: &str,
    ) -> AppResult<Option<quote::Model>> {
        Quote::find()
            .filter(quote::Column::Text.eq(text))
            .filter(quote::Column::Author.eq(author))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a quote, reusing the existing row when the (text, author)
    /// unique index already holds one.
    pub async fn upsert(&self, id: String, text: &str, author: &str) -> AppResult<quote::Model> {
        let model = quote::ActiveModel {
            id: Set(id),
            text: Set(text.to_string()),
            author: Set(author.to_string()),
            likes: Set(0),
            dislikes: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        let insert = Quote::insert(model).on_conflict(
            OnConflict::columns([quote::Column::Text, quote::Column::Author])
                .do_nothing()
                .to_owned(),
        );

        match insert.exec_with_returning(self.db.as_ref()).await {
            Ok(inserted) => Ok(inserted),
            Err(DbErr::RecordNotInserted) => self
                .find_by_text_and_author(text, author)
                .await?
                .ok_or_else(|| {
                    AppError::Database("conflicting quote row disappeared".to_string())
                }),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Find all quotes whose ID is in the given set.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<quote::Model>> {
        Quote::find()
            .filter(quote::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all stored quotes.
    pub async fn count(&self) -> AppResult<u64> {
        Quote::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
