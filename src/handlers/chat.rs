use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::DialogueState;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let session_id = payload
        .session_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::info!(session = %session_id, "incoming chat message");

    let reply = conversation::handle_turn(&state, &session_id, message).await;

    Ok(Json(ChatResponse { session_id, reply }))
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub reset: bool,
}

// POST /api/chat/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    let session_id = payload.session_id.trim();
    let removed = {
        let _turn = state.session_locks.acquire(session_id).await;
        state
            .sessions
            .remove(session_id)
            .map_err(|e| AppError::SessionStore(e.to_string()))?
    };

    tracing::info!(session = %session_id, removed, "dialogue reset");
    Ok(Json(ResetResponse { reset: removed }))
}

// GET /api/chat/:session_id/state
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<DialogueState>, AppError> {
    state
        .sessions
        .load(&session_id)
        .map_err(|e| AppError::SessionStore(e.to_string()))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))
}
