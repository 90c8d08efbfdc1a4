use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Intent;
use crate::table::MatchResult;

/// What the reservation path decided, for callers that want more than text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// Extracted party size; `None` when the quantity was unknown.
    pub party_size: Option<u32>,
    /// Table lookup result; absent when no lookup was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_match: Option<MatchResult>,
}

/// Result of handling one user utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub intent: Intent,
    /// Final text as phrased by the generator.
    pub assistant_text: String,
    /// Set only for reservation turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<ReservationDetails>,
}

/// One request/response exchange, as recorded by a front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// UUIDv7, time-sortable.
    pub id: Uuid,
    pub user_text: String,
    pub intent: Intent,
    pub assistant_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<ReservationDetails>,
    /// Wall time spent handling the turn.
    pub latency_ms: u64,
    pub responded_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(user_text: impl Into<String>, response: AssistantResponse, latency_ms: u64) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_text: user_text.into(),
            intent: response.intent,
            assistant_text: response.assistant_text,
            reservation: response.reservation,
            latency_ms,
            responded_at: Utc::now(),
        }
    }
}
