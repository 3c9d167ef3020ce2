//! Database entities.

pub mod daily_subscriber;
pub mod favorite;
pub mod quote;
pub mod reaction;
pub mod search_history;

pub use daily_subscriber::Entity as DailySubscriber;
pub use favorite::Entity as Favorite;
pub use quote::Entity as Quote;
pub use reaction::Entity as Reaction;
pub use search_history::Entity as SearchHistory;
