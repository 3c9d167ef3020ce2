//! Reaction endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use quotes_common::AppResult;
use quotes_db::entities::{quote, reaction::ReactionKind};
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/react", post(react))
        .route("/rating/{quote_id}", get(rating))
}

/// React request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    pub quote_id: String,
    pub user_id: i64,
    pub reaction_type: ReactionKind,
}

/// Current reaction counts for a quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub quote_id: String,
    pub likes: i32,
    pub dislikes: i32,
}

impl From<quote::Model> for RatingResponse {
    fn from(quote: quote::Model) -> Self {
        Self {
            quote_id: quote.id,
            likes: quote.likes,
            dislikes: quote.dislikes,
        }
    }
}

/// Cast a like or dislike on a quote.
async fn react(
    State(state): State<AppState>,
    Json(req): Json<ReactRequest>,
) -> AppResult<ApiResponse<RatingResponse>> {
    let quote = state
        .reaction_service
        .react(&req.quote_id, req.user_id, req.reaction_type)
        .await?;

    Ok(ApiResponse::ok(quote.into()))
}

/// Current like/dislike counts for a quote.
async fn rating(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
) -> AppResult<ApiResponse<RatingResponse>> {
    let quote = state.quote_service.rating(&quote_id).await?;

    Ok(ApiResponse::ok(quote.into()))
}
