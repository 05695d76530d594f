//! GET /api/history - A session's messages as `[{role, content}]`.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use chatrelay_types::message::{Message, MessageView, SessionId};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Without a `sessionId` the answer is an empty list, not an error.
pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let Query(query) = query?;
    let Some(session_id) = query.session_id.filter(|id| !id.is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let history = state
        .store()
        .get_history(&SessionId::new(session_id))
        .await?;

    Ok(Json(history.iter().map(Message::view).collect()))
}
