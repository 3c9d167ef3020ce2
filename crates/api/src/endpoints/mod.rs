//! API endpoints.

mod daily;
mod favorites;
mod history;
mod quotes;
mod reactions;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/quotes",
        quotes::router()
            .merge(favorites::router())
            .merge(history::router())
            .merge(reactions::router())
            .merge(daily::router()),
    )
}
