//! Shared application state for the Axum server.
//!
//! The orchestrator and inventory are shared read-only. The turn log is
//! front-end bookkeeping only; the orchestrator never reads it.

use std::sync::Arc;

use tokio::sync::RwLock;

use bistro_agent::extraction::ExtractionMode;
use bistro_agent::{Orchestrator, TextGenerator, TextToSpeech};
use bistro_protocol::ConversationTurn;
use bistro_tables::TableInventory;

/// Oldest turns are dropped beyond this many.
pub const TURN_LOG_CAPACITY: usize = 500;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Text-to-speech backend; speech routes answer 503 without one.
    pub tts: Option<Arc<dyn TextToSpeech>>,
    /// In-memory log of handled turns, oldest first.
    pub turns: Arc<RwLock<Vec<ConversationTurn>>>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            tts: None,
            turns: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// State over the sample inventory, for development / tests.
    pub fn with_sample_data(generator: Arc<dyn TextGenerator>) -> Self {
        let inventory = Arc::new(TableInventory::sample());
        Self::new(Arc::new(Orchestrator::new(
            generator,
            inventory,
            ExtractionMode::Generator,
        )))
    }

    pub fn with_text_to_speech(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.tts = Some(tts);
        self
    }

    pub fn inventory(&self) -> &TableInventory {
        self.orchestrator.inventory()
    }

    /// Append a turn, evicting the oldest past capacity.
    pub async fn record_turn(&self, turn: ConversationTurn) {
        let mut turns = self.turns.write().await;
        turns.push(turn);
        if turns.len() > TURN_LOG_CAPACITY {
            let excess = turns.len() - TURN_LOG_CAPACITY;
            turns.drain(..excess);
        }
    }
}
