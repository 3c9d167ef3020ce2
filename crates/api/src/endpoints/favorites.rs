//! Favorites endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use quotes_common::AppResult;
use quotes_db::entities::quote;
use serde::{Deserialize, Serialize};

use crate::{
    response::{ApiResponse, MessageResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites/add", post(create))
        .route("/favorites/list", get(list))
        .route("/favorites/delete/{id}", delete(remove))
        .route("/top", get(top))
}

/// Add favorite request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    pub user_id: i64,
}

/// Query identifying the acting user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: i64,
}

/// Quote as listed among favorites.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: String,
    pub text: String,
    pub author: String,
}

impl From<quote::Model> for QuoteResponse {
    fn from(quote: quote::Model) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
            author: quote.author,
        }
    }
}

/// Favorites list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesListResponse {
    pub count: usize,
    pub quotes: Vec<QuoteResponse>,
}

/// One entry of the cross-user ranking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopQuoteResponse {
    pub id: String,
    pub text: String,
    pub author: String,
    pub favorites: i64,
}

/// Add a quote to the user's favorites.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<AddFavoriteRequest>,
) -> AppResult<ApiResponse<MessageResponse>> {
    state
        .favorite_service
        .add(&req.text, &req.author, req.user_id)
        .await?;

    Ok(ApiResponse::ok(MessageResponse::new(
        "Quote added to favorites",
    )))
}

/// List the user's favorites.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<FavoritesListResponse>> {
    let quotes = state.favorite_service.list(query.user_id).await?;

    Ok(ApiResponse::ok(FavoritesListResponse {
        count: quotes.len(),
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
    }))
}

/// Remove a quote from the user's favorites.
async fn remove(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<MessageResponse>> {
    state
        .favorite_service
        .remove(&quote_id, query.user_id)
        .await?;

    Ok(ApiResponse::ok(MessageResponse::new(
        "Quote removed from favorites",
    )))
}

/// The five most-favorited quotes across all users.
async fn top(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<TopQuoteResponse>>> {
    let ranking = state.favorite_service.top().await?;

    Ok(ApiResponse::ok(
        ranking
            .into_iter()
            .map(|(quote, favorites)| TopQuoteResponse {
                id: quote.id,
                text: quote.text,
                author: quote.author,
                favorites,
            })
            .collect(),
    ))
}
