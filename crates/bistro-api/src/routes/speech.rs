//! Speech synthesis endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// POST /api/v1/speech — synthesize text, return the audio file path.
pub async fn synthesize(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> ApiResult<Json<Value>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }
    let tts = state
        .tts
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("text-to-speech not configured".into()))?;

    let path = tts.synthesize(&req.text).await?;
    Ok(Json(json!({ "audio_path": path.display().to_string() })))
}
