//! Application state shared by all handlers.

#![allow(missing_docs)]

use quotes_core::{
    FavoriteService, ImageCache, QuoteService, ReactionService, SearchHistoryService,
    SubscriptionService,
};
use std::sync::Arc;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub quote_service: QuoteService,
    pub favorite_service: FavoriteService,
    pub reaction_service: ReactionService,
    pub history_service: SearchHistoryService,
    pub subscription_service: SubscriptionService,
    pub image_cache: Arc<ImageCache>,
}
