//! Quote image caching.
//!
//! Holds the last image fetched from the provider behind a fixed TTL.
//! The cache entry lock is held across a refresh, so concurrent requests
//! arriving while the entry is expired collapse into a single upstream
//! fetch and can never observe a half-written entry.

use crate::services::provider::{FetchedImage, QuoteProviderService};
use quotes_common::AppResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default cache TTL for the provider image.
const IMAGE_CACHE_TTL: Duration = Duration::from_secs(40);

/// Source of the current time.
///
/// Injected so tests can drive expiry without sleeping.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by the system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CachedImage {
    image: FetchedImage,
    fetched_at: Instant,
}

/// TTL cache in front of the provider's image endpoint.
pub struct ImageCache {
    provider: QuoteProviderService,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: Mutex<Option<CachedImage>>,
}

impl ImageCache {
    /// Create a new image cache with the default TTL and system clock.
    #[must_use]
    pub fn new(provider: QuoteProviderService) -> Self {
        Self::with_clock(provider, IMAGE_CACHE_TTL, Arc::new(SystemClock))
    }

    /// Create a new image cache with a custom TTL and clock.
    #[must_use]
    pub fn with_clock(provider: QuoteProviderService, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Get the cached image, refreshing from the provider when the entry
    /// is missing or older than the TTL.
    ///
    /// A failed refresh is returned as-is; stale bytes are never served.
    pub async fn get_or_fetch(&self) -> AppResult<FetchedImage> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if self.clock.now().duration_since(cached.fetched_at) < self.ttl {
                tracing::debug!("Serving quote image from cache");
                return Ok(cached.image.clone());
            }
        }

        let image = self.provider.fetch_image().await?;
        *entry = Some(CachedImage {
            image: image.clone(),
            fetched_at: self.clock.now(),
        });
        tracing::debug!(content_type = %image.content_type, "Refreshed quote image cache");

        Ok(image)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::provider::{ProviderQuote, QuoteProvider};
    use async_trait::async_trait;
    use bytes::Bytes;
    use quotes_common::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Clock that only moves when the test advances it.
    struct ManualClock {
        start: Instant,
        offset: std::sync::Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                offset: std::sync::Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.start + *self.offset.lock().unwrap()
        }
    }

    /// Provider that counts image fetches and serves a new payload each time.
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for CountingProvider {
        async fn fetch_quotes(&self) -> AppResult<Vec<ProviderQuote>> {
            Err(AppError::Internal("not used in image tests".to_string()))
        }

        async fn fetch_image(&self) -> AppResult<FetchedImage> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::UpstreamStatus(503));
            }
            Ok(FetchedImage {
                content_type: "image/jpeg".to_string(),
                bytes: Bytes::from(format!("image-{call}")),
            })
        }
    }

    #[tokio::test]
    async fn test_second_get_within_ttl_hits_cache() {
        let provider = Arc::new(CountingProvider::new());
        let clock = Arc::new(ManualClock::new());
        let cache = ImageCache::with_clock(
            provider.clone(),
            Duration::from_secs(40),
            clock.clone(),
        );

        let first = cache.get_or_fetch().await.unwrap();
        clock.advance(Duration::from_secs(39));
        let second = cache.get_or_fetch().await.unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refreshed() {
        let provider = Arc::new(CountingProvider::new());
        let clock = Arc::new(ManualClock::new());
        let cache = ImageCache::with_clock(
            provider.clone(),
            Duration::from_secs(40),
            clock.clone(),
        );

        let first = cache.get_or_fetch().await.unwrap();
        clock.advance(Duration::from_secs(41));
        let second = cache.get_or_fetch().await.unwrap();

        assert_ne!(first.bytes, second.bytes);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_never_serves_stale_bytes() {
        let provider = Arc::new(CountingProvider::failing());
        let clock = Arc::new(ManualClock::new());
        let cache = ImageCache::with_clock(provider, Duration::from_secs(40), clock);

        let result = cache.get_or_fetch().await;
        match result {
            Err(AppError::UpstreamStatus(503)) => {}
            _ => panic!("Expected forwarded upstream status"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_expiry_fetches_once() {
        let provider = Arc::new(CountingProvider::new());
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(ImageCache::with_clock(
            provider.clone(),
            Duration::from_secs(40),
            clock,
        ));

        let a = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.get_or_fetch().await.unwrap() }
        });
        let b = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.get_or_fetch().await.unwrap() }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(provider.calls(), 1);
    }
}
