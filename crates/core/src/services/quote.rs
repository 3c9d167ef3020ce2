//! Quote ingestion service.

use crate::services::provider::QuoteProviderService;
use quotes_common::{AppError, AppResult, IdGenerator};
use quotes_db::{
    entities::{quote, search_history},
    repositories::{QuoteRepository, SearchHistoryRepository},
};
use rand::seq::SliceRandom;
use sea_orm::Set;

/// A quote served to a user, with the full-coverage flag.
#[derive(Debug, Clone)]
pub struct ServedQuote {
    /// The stored quote, with current reaction counts.
    pub quote: quote::Model,
    /// Whether serving this quote completed the user's coverage of the
    /// corpus, which resets their history.
    pub all_seen: bool,
}

/// Quote service for ingesting quotes from the upstream provider.
#[derive(Clone)]
pub struct QuoteService {
    quote_repo: QuoteRepository,
    history_repo: SearchHistoryRepository,
    provider: QuoteProviderService,
    id_gen: IdGenerator,
}

impl QuoteService {
    /// Create a new quote service.
    #[must_use]
    pub fn new(
        quote_repo: QuoteRepository,
        history_repo: SearchHistoryRepository,
        provider: QuoteProviderService,
    ) -> Self {
        Self {
            quote_repo,
            history_repo,
            provider,
            id_gen: IdGenerator::new(),
        }
    }

    /// Fetch a provider batch, pick one quote uniformly at random and
    /// upsert it by its (text, author) business key.
    pub async fn pull_random(&self) -> AppResult<quote::Model> {
        let batch = self.provider.fetch_quotes().await?;

        let pick = batch
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| AppError::UpstreamPayload("empty quote batch".to_string()))?;

        self.quote_repo
            .upsert(self.id_gen.generate(), &pick.text, &pick.author)
            .await
    }

    /// Serve a random quote to a user, recording it in their history.
    ///
    /// Once the user's history covers every stored quote, the history is
    /// purged (only theirs) and the response carries `all_seen`, so
    /// subsequent calls can repeat quotes.
    pub async fn random_for_user(&self, user_id: i64) -> AppResult<ServedQuote> {
        let quote = self.pull_random().await?;

        let query = format!("{} — {}", quote.text, quote.author);
        if !self.history_repo.exists(user_id, &query).await? {
            let entry = search_history::ActiveModel {
                id: Set(self.id_gen.generate()),
                user_id: Set(user_id),
                query: Set(query),
                search_date: Set(chrono::Utc::now().into()),
            };
            self.history_repo.create(entry).await?;
        }

        let seen = self.history_repo.count_by_user(user_id).await?;
        let total = self.quote_repo.count().await?;

        let all_seen = total > 0 && seen >= total;
        if all_seen {
            let purged = self.history_repo.delete_by_user(user_id).await?;
            tracing::info!(user_id, purged, "User has seen every quote, history reset");
        }

        Ok(ServedQuote { quote, all_seen })
    }

    /// Get the current like/dislike counts for a quote.
    pub async fn rating(&self, quote_id: &str) -> AppResult<quote::Model> {
        self.quote_repo.get_by_id(quote_id).await
    }
}
