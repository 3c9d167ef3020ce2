//! Daily subscription and dispatch service.

use crate::services::delivery::MessageDeliveryService;
use crate::services::quote::QuoteService;
use quotes_common::{AppError, AppResult, IdGenerator};
use quotes_db::{entities::daily_subscriber, repositories::DailySubscriberRepository};
use sea_orm::Set;

/// Outcome of one dispatch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Subscribers whose preferred time matched.
    pub subscribers: u64,
    /// Messages actually handed to the messaging provider.
    pub delivered: u64,
}

/// Subscription service for the daily Telegram push.
///
/// Dispatch is driven by an external scheduler that calls in with the
/// current "HH:mm" time; the service never schedules itself.
#[derive(Clone)]
pub struct SubscriptionService {
    subscriber_repo: DailySubscriberRepository,
    quote_service: QuoteService,
    delivery: MessageDeliveryService,
    id_gen: IdGenerator,
}

impl SubscriptionService {
    /// Create a new subscription service.
    #[must_use]
    pub fn new(
        subscriber_repo: DailySubscriberRepository,
        quote_service: QuoteService,
        delivery: MessageDeliveryService,
    ) -> Self {
        Self {
            subscriber_repo,
            quote_service,
            delivery,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a chat for the daily push at the given "HH:mm" time.
    pub async fn subscribe(&self, chat_id: i64, time: &str) -> AppResult<()> {
        if time.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Preferred time is required".to_string(),
            ));
        }

        let model = daily_subscriber::ActiveModel {
            id: Set(self.id_gen.generate()),
            chat_id: Set(chat_id),
            preferred_time: Set(time.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.subscriber_repo.insert(model).await?;

        tracing::info!(chat_id, time, "Registered daily subscriber");
        Ok(())
    }

    /// Remove a chat's subscription.
    pub async fn unsubscribe(&self, chat_id: i64) -> AppResult<()> {
        if !self.subscriber_repo.delete_by_chat_id(chat_id).await? {
            return Err(AppError::NotFound("Subscriber not found".to_string()));
        }
        tracing::info!(chat_id, "Removed daily subscriber");
        Ok(())
    }

    /// Push one random quote to every subscriber whose preferred time
    /// equals the given "HH:mm" string.
    ///
    /// Delivery is fire-and-forget: a failing chat is logged and skipped,
    /// the rest of the batch still goes out.
    pub async fn dispatch(&self, time: &str) -> AppResult<DispatchSummary> {
        let subscribers = self.subscriber_repo.find_by_time(time).await?;
        if subscribers.is_empty() {
            return Ok(DispatchSummary {
                subscribers: 0,
                delivered: 0,
            });
        }

        let quote = self.quote_service.pull_random().await?;
        let text = format!("{}\n\n— {}", quote.text, quote.author);

        let mut delivered = 0u64;
        for subscriber in &subscribers {
            match self.delivery.send_message(subscriber.chat_id, &text).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(chat_id = subscriber.chat_id, error = %e, "Failed to deliver daily quote");
                }
            }
        }

        tracing::info!(time, delivered, total = subscribers.len(), "Dispatched daily quotes");
        Ok(DispatchSummary {
            subscribers: subscribers.len() as u64,
            delivered,
        })
    }
}
