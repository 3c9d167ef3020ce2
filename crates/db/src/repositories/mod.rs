//! Database repositories.

pub mod daily_subscriber;
pub mod favorite;
pub mod quote;
pub mod reaction;
pub mod search_history;

pub use daily_subscriber::DailySubscriberRepository;
pub use favorite::FavoriteRepository;
pub use quote::QuoteRepository;
pub use reaction::ReactionRepository;
pub use search_history::SearchHistoryRepository;
