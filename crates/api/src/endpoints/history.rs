//! Search history endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::{delete, get},
};
use quotes_common::AppResult;
use quotes_db::entities::search_history;
use serde::{Deserialize, Serialize};

use crate::{
    response::{ApiResponse, MessageResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(list))
        .route("/history/clear", delete(clear))
}

/// Query identifying the acting user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: i64,
}

/// One history entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub id: String,
    pub query: String,
    pub search_date: String,
}

impl From<search_history::Model> for HistoryEntryResponse {
    fn from(entry: search_history::Model) -> Self {
        Self {
            id: entry.id,
            query: entry.query,
            search_date: entry.search_date.to_rfc3339(),
        }
    }
}

/// The user's five most recent history entries.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<Vec<HistoryEntryResponse>>> {
    let entries = state.history_service.recent(query.user_id).await?;

    Ok(ApiResponse::ok(
        entries.into_iter().map(HistoryEntryResponse::from).collect(),
    ))
}

/// Clear the user's history.
async fn clear(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<ApiResponse<MessageResponse>> {
    state.history_service.clear(query.user_id).await?;

    Ok(ApiResponse::ok(MessageResponse::new(
        "Search history cleared",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_serialization() {
        let entry = HistoryEntryResponse {
            id: "h1".to_string(),
            query: "Be brave — X".to_string(),
            search_date: "2025-06-01T08:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"query\":\"Be brave — X\""));
        assert!(json.contains("\"searchDate\""));
    }
}
