//! Reaction service.

use quotes_common::{AppResult, IdGenerator};
use quotes_db::{
    entities::{
        quote,
        reaction::{self, ReactionKind},
    },
    repositories::{QuoteRepository, ReactionRepository},
};
use sea_orm::Set;

/// Reaction service for like/dislike votes on quotes.
#[derive(Clone)]
pub struct ReactionService {
    reaction_repo: ReactionRepository,
    quote_repo: QuoteRepository,
    id_gen: IdGenerator,
}

impl ReactionService {
    /// Create a new reaction service.
    #[must_use]
    pub fn new(reaction_repo: ReactionRepository, quote_repo: QuoteRepository) -> Self {
        Self {
            reaction_repo,
            quote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Cast a reaction on a quote, returning the quote with its updated
    /// counts.
    ///
    /// Idempotent per (quote, user): repeating the same kind changes
    /// nothing; switching kinds moves exactly one unit between the
    /// counters.
    pub async fn react(
        &self,
        quote_id: &str,
        user_id: i64,
        kind: ReactionKind,
    ) -> AppResult<quote::Model> {
        let quote = self.quote_repo.get_by_id(quote_id).await?;

        let existing = self
            .reaction_repo
            .find_by_quote_and_user(quote_id, user_id)
            .await?;

        match existing {
            Some(current) if current.kind == kind => {
                tracing::debug!(quote_id, user_id, "Repeated reaction, nothing to do");
                Ok(quote)
            }
            Some(current) => {
                self.reaction_repo
                    .switch(&current.id, self.new_model(quote_id, user_id, kind), kind)
                    .await?;
                self.quote_repo.get_by_id(quote_id).await
            }
            None => {
                self.reaction_repo
                    .insert(self.new_model(quote_id, user_id, kind), kind)
                    .await?;
                self.quote_repo.get_by_id(quote_id).await
            }
        }
    }

    fn new_model(&self, quote_id: &str, user_id: i64, kind: ReactionKind) -> reaction::ActiveModel {
        reaction::ActiveModel {
            id: Set(self.id_gen.generate()),
            quote_id: Set(quote_id.to_string()),
            user_id: Set(user_id),
            kind: Set(kind),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quotes_common::AppError;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_quote(id: &str, likes: i32, dislikes: i32) -> quote::Model {
        quote::Model {
            id: id.to_string(),
            text: "Be brave".to_string(),
            author: "X".to_string(),
            likes,
            dislikes,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_reaction(id: &str, quote_id: &str, user_id: i64, kind: ReactionKind) -> reaction::Model {
        reaction::Model {
            id: id.to_string(),
            quote_id: quote_id.to_string(),
            user_id,
            kind,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_react_unknown_quote() {
        let quote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<quote::Model>::new()])
                .into_connection(),
        );
        let reaction_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ReactionService::new(
            ReactionRepository::new(reaction_db),
            QuoteRepository::new(quote_db),
        );

        let result = service.react("missing", 9, ReactionKind::Like).await;
        match result {
            Err(AppError::QuoteNotFound(_)) => {}
            _ => panic!("Expected QuoteNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_repeated_reaction_is_noop() {
        let quote = create_test_quote("q5", 1, 0);
        let existing = create_test_reaction("r1", "q5", 9, ReactionKind::Like);

        let quote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[quote]])
                .into_connection(),
        );
        let reaction_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = ReactionService::new(
            ReactionRepository::new(reaction_db),
            QuoteRepository::new(quote_db),
        );

        let result = service.react("q5", 9, ReactionKind::Like).await.unwrap();
        assert_eq!(result.likes, 1);
        assert_eq!(result.dislikes, 0);
    }

    #[tokio::test]
    async fn test_switch_moves_one_unit() {
        let before = create_test_quote("q5", 1, 0);
        let after = create_test_quote("q5", 0, 1);
        let existing = create_test_reaction("r1", "q5", 9, ReactionKind::Like);
        let replacement = create_test_reaction("r2", "q5", 9, ReactionKind::Dislike);

        let quote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[before]])
                .append_query_results([[after]])
                .into_connection(),
        );
        let reaction_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // lookup of the existing reaction, then the replacement insert
                .append_query_results([[existing]])
                .append_query_results([[replacement]])
                // old-row delete, combined counter update
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let service = ReactionService::new(
            ReactionRepository::new(reaction_db),
            QuoteRepository::new(quote_db),
        );

        let result = service.react("q5", 9, ReactionKind::Dislike).await.unwrap();
        assert_eq!(result.likes, 0);
        assert_eq!(result.dislikes, 1);
    }

    #[tokio::test]
    async fn test_first_reaction_increments_counter() {
        let before = create_test_quote("q5", 0, 0);
        let after = create_test_quote("q5", 1, 0);
        let inserted = create_test_reaction("r1", "q5", 9, ReactionKind::Like);

        let quote_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[before]])
                .append_query_results([[after]])
                .into_connection(),
        );
        let reaction_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reaction::Model>::new()])
                .append_query_results([[inserted]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = ReactionService::new(
            ReactionRepository::new(reaction_db),
            QuoteRepository::new(quote_db),
        );

        let result = service.react("q5", 9, ReactionKind::Like).await.unwrap();
        assert_eq!(result.likes, 1);
        assert_eq!(result.dislikes, 0);
    }
}
