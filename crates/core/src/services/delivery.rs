//! Telegram message delivery.
//!
//! Provides an abstraction for pushing text messages to subscriber chats.
//! Delivery is fire-and-forget: callers log failures and move on.

use async_trait::async_trait;
use quotes_common::{AppError, AppResult, config::TelegramConfig};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Trait for message delivery.
///
/// This allows the dispatch service to push messages without directly
/// depending on the Telegram Bot API client.
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    /// Deliver a text message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()>;
}

/// Wrapper for boxed `MessageDelivery` trait object.
pub type MessageDeliveryService = Arc<dyn MessageDelivery>;

/// Message delivery through the Telegram Bot API.
pub struct TelegramDelivery {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl TelegramDelivery {
    /// Create a new Telegram delivery client.
    #[must_use]
    #[allow(clippy::expect_used)] // Client build only fails with incompatible TLS settings
    pub fn new(config: &TelegramConfig, bot_token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token,
        }
    }
}

#[async_trait]
impl MessageDelivery for TelegramDelivery {
    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        let response = self
            .client
            .post(url)
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "Telegram API returned status {status}"
            )));
        }

        tracing::debug!(chat_id, "Delivered message to Telegram chat");
        Ok(())
    }
}

/// A no-op implementation of `MessageDelivery` for testing or when no bot
/// token is configured.
#[derive(Clone, Default)]
pub struct NoOpDelivery;

#[async_trait]
impl MessageDelivery for NoOpDelivery {
    async fn send_message(&self, chat_id: i64, _text: &str) -> AppResult<()> {
        tracing::debug!(chat_id, "Message delivery disabled, dropping message");
        Ok(())
    }
}
