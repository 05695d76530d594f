//! Message HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/message - Relay a user message, return the assistant reply
//! - DELETE /api/message - Reset a session's history

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use chatrelay_types::message::SessionId;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub session_id: SessionId,
    pub reply: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetSessionResponse {
    pub ok: bool,
}

/// Parse a JSON body regardless of the request's `Content-Type`.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// POST /api/message - Relay one turn through the inference provider.
///
/// An absent or blank `sessionId` starts a new session; the generated id is
/// returned so the client can keep using it.
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SendMessageResponse>, AppError> {
    let request: SendMessageRequest = parse_body(&body)?;
    let text = request.message.unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::invalid_request("message is required"));
    }

    let session_id = SessionId::or_generate(request.session_id);
    let reply = state
        .orchestrator
        .handle_message(&session_id, &text)
        .await?;

    Ok(Json(SendMessageResponse { session_id, reply }))
}

/// DELETE /api/message - Remove all messages of a session. Idempotent.
pub async fn reset_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResetSessionResponse>, AppError> {
    let request: ResetSessionRequest = parse_body(&body)?;
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .map(SessionId::new)
        .ok_or_else(|| AppError::invalid_request("sessionId is required"))?;

    state.store().delete_session(&session_id).await?;
    tracing::info!(session_id = %session_id, "Session reset");

    Ok(Json(ResetSessionResponse { ok: true }))
}
