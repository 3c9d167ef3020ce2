//! Upstream quote provider client.
//!
//! Implements the ZenQuotes-compatible contract: a JSON array of
//! `{"q": text, "a": author}` objects and a raw image endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use quotes_common::{AppError, AppResult, config::ProviderConfig};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// One quote as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderQuote {
    /// Quote text (short key `q` on the wire).
    #[serde(rename = "q")]
    pub text: String,
    /// Quote author (short key `a` on the wire).
    #[serde(rename = "a")]
    pub author: String,
}

/// An image fetched from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Content type reported by the provider.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Bytes,
}

/// Trait for the upstream quote provider.
///
/// This allows the services to fetch quote batches and images without
/// depending on the concrete HTTP client, and tests to substitute a
/// scripted provider.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a batch of candidate quotes.
    async fn fetch_quotes(&self) -> AppResult<Vec<ProviderQuote>>;

    /// Fetch the provider's current quote image.
    async fn fetch_image(&self) -> AppResult<FetchedImage>;
}

/// Wrapper for boxed `QuoteProvider` trait object.
pub type QuoteProviderService = Arc<dyn QuoteProvider>;

/// Content type assumed when the provider omits the header.
const FALLBACK_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// HTTP client for a ZenQuotes-compatible provider.
pub struct ZenQuotesProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ZenQuotesProvider {
    /// Create a new provider client.
    #[must_use]
    #[allow(clippy::expect_used)] // Client build only fails with incompatible TLS settings
    pub fn new(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuoteProvider for ZenQuotesProvider {
    async fn fetch_quotes(&self) -> AppResult<Vec<ProviderQuote>> {
        let response = self
            .client
            .get(format!("{}/quotes", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Quote provider returned an error status");
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let quotes: Vec<ProviderQuote> =
            serde_json::from_str(&body).map_err(|e| AppError::UpstreamPayload(e.to_string()))?;

        if quotes.is_empty() {
            return Err(AppError::UpstreamPayload("empty quote batch".to_string()));
        }

        Ok(quotes)
    }

    async fn fetch_image(&self) -> AppResult<FetchedImage> {
        let response = self
            .client
            .get(format!("{}/image", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Image provider returned an error status");
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_IMAGE_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }
}
