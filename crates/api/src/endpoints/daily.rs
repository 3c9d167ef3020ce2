//! Daily subscription endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::post,
};
use quotes_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{
    response::{ApiResponse, MessageResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", post(subscribe))
        .route("/daily/send", post(send))
        .route("/unsubscribe", post(unsubscribe))
}

/// Subscribe query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeQuery {
    pub chat_id: i64,
    pub time: String,
}

/// Unsubscribe query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeQuery {
    pub chat_id: i64,
}

/// Dispatch query: the "HH:mm" time to match subscribers against.
#[derive(Debug, Deserialize)]
pub struct SendQuery {
    pub time: String,
}

/// Dispatch outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub subscribers: u64,
    pub delivered: u64,
}

/// Register a chat for the daily quote push.
async fn subscribe(
    State(state): State<AppState>,
    Query(query): Query<SubscribeQuery>,
) -> AppResult<ApiResponse<MessageResponse>> {
    state
        .subscription_service
        .subscribe(query.chat_id, &query.time)
        .await?;

    Ok(ApiResponse::ok(MessageResponse::new(
        "Subscribed to the daily quote",
    )))
}

/// Remove a chat's subscription.
async fn unsubscribe(
    State(state): State<AppState>,
    Query(query): Query<UnsubscribeQuery>,
) -> AppResult<ApiResponse<MessageResponse>> {
    state.subscription_service.unsubscribe(query.chat_id).await?;

    Ok(ApiResponse::ok(MessageResponse::new(
        "Unsubscribed from the daily quote",
    )))
}

/// Push a quote to every subscriber matching the given time.
///
/// Invoked by an external scheduler, typically once per minute with the
/// current "HH:mm" time.
async fn send(
    State(state): State<AppState>,
    Query(query): Query<SendQuery>,
) -> AppResult<ApiResponse<DispatchResponse>> {
    let summary = state.subscription_service.dispatch(&query.time).await?;

    Ok(ApiResponse::ok(DispatchResponse {
        subscribers: summary.subscribers,
        delivered: summary.delivered,
    }))
}
