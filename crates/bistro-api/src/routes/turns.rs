//! Conversation turn endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use bistro_protocol::ConversationTurn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// How many turns `GET /turns` returns.
const RECENT_TURNS: usize = 50;

/// Request body for one user utterance.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub text: String,
}

/// POST /api/v1/turns — handle one utterance.
pub async fn create_turn(
    State(state): State<AppState>,
    Json(req): Json<TurnRequest>,
) -> ApiResult<Json<ConversationTurn>> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }

    let start = Instant::now();
    let response = state.orchestrator.handle(text).await?;
    let latency_ms = start.elapsed().as_millis() as u64;

    let turn = ConversationTurn::new(text, response, latency_ms);
    tracing::info!(
        turn_id = %turn.id,
        intent = %turn.intent,
        latency_ms,
        "turn completed"
    );
    state.record_turn(turn.clone()).await;

    Ok(Json(turn))
}

/// GET /api/v1/turns — most recent turns, newest first.
pub async fn list_turns(State(state): State<AppState>) -> Json<Vec<ConversationTurn>> {
    let turns = state.turns.read().await;
    Json(turns.iter().rev().take(RECENT_TURNS).cloned().collect())
}
