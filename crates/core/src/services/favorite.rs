//! Favorite service.

use quotes_common::{AppError, AppResult, IdGenerator};
use quotes_db::{
    entities::{favorite, quote},
    repositories::{FavoriteRepository, QuoteRepository},
};
use sea_orm::Set;
use std::collections::HashMap;

/// How many quotes the cross-user ranking returns.
const TOP_LIMIT: u64 = 5;

/// Favorite service for managing a user's saved quotes.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    quote_repo: QuoteRepository,
    id_gen: IdGenerator,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub fn new(favorite_repo: FavoriteRepository, quote_repo: QuoteRepository) -> Self {
        Self {
            favorite_repo,
            quote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a quote to a user's favorites.
    ///
    /// The quote itself is upserted first, so favoriting a quote the store
    /// has never seen works too.
    pub async fn add(&self, text: &str, author: &str, user_id: i64) -> AppResult<quote::Model> {
        if text.trim().is_empty() || author.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Quote text and author are required".to_string(),
            ));
        }

        let quote = self
            .quote_repo
            .upsert(self.id_gen.generate(), text, author)
            .await?;

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            quote_id: Set(quote.id.clone()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.favorite_repo.insert(model).await?;

        Ok(quote)
    }

    /// List a user's favorited quotes.
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<quote::Model>> {
        let rows = self.favorite_repo.find_by_user_with_quotes(user_id).await?;
        Ok(rows.into_iter().filter_map(|(_, quote)| quote).collect())
    }

    /// Remove a quote from a user's favorites.
    pub async fn remove(&self, quote_id: &str, user_id: i64) -> AppResult<()> {
        if !self
            .favorite_repo
            .delete_by_quote_and_user(quote_id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }
        Ok(())
    }

    /// The five most-favorited quotes across all users, with their counts.
    pub async fn top(&self) -> AppResult<Vec<(quote::Model, i64)>> {
        let ranking = self.favorite_repo.top_favorited(TOP_LIMIT).await?;
        if ranking.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ranking.iter().map(|(id, _)| id.clone()).collect();
        let mut by_id: HashMap<String, quote::Model> = self
            .quote_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        Ok(ranking
            .into_iter()
            .filter_map(|(id, count)| by_id.remove(&id).map(|q| (q, count)))
            .collect())
    }
}
