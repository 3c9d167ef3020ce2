//! Core quote endpoints: liveness, random quote, image proxy.

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use quotes_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(info))
        .route("/random", get(random))
        .route("/image", get(image))
}

/// Liveness check.
async fn info() -> &'static str {
    "Quotes API is working ✅"
}

/// Random quote query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomQuery {
    pub user_id: i64,
}

/// Random quote response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomQuoteResponse {
    pub id: String,
    pub text: String,
    pub author: String,
    pub likes: i32,
    pub dislikes: i32,
    pub all_seen: bool,
}

/// Serve a random quote and record it in the user's history.
async fn random(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> AppResult<ApiResponse<RandomQuoteResponse>> {
    let served = state.quote_service.random_for_user(query.user_id).await?;

    Ok(ApiResponse::ok(RandomQuoteResponse {
        id: served.quote.id,
        text: served.quote.text,
        author: served.quote.author,
        likes: served.quote.likes,
        dislikes: served.quote.dislikes,
        all_seen: served.all_seen,
    }))
}

/// Pass the provider's quote image through the process-wide cache.
async fn image(State(state): State<AppState>) -> AppResult<Response> {
    let image = state.image_cache.get_or_fetch().await?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
