//! Shared test harness for E2E integration tests.
//!
//! Wires the HTTP API to a real `OllamaClient` pointed at a wiremock
//! server, so every turn crosses the protocol, tables, agent and api
//! crates the way production traffic does.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bistro_agent::extraction::ExtractionMode;
use bistro_agent::{MockTextToSpeech, OllamaClient, OllamaConfig, Orchestrator};
use bistro_api::routes::build_router;
use bistro_api::state::AppState;
use bistro_tables::TableInventory;

/// Inventory shipped with the repository.
pub const TABLES_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/tables.json");

/// Ollama chat response body carrying `content`.
pub fn ollama_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": content},
        "done": true
    })
}

/// End-to-end harness: API router + mocked Ollama server.
pub struct TestHarness {
    pub ollama: MockServer,
    pub state: AppState,
    pub router: Router,
    pub tts: Arc<MockTextToSpeech>,
}

impl TestHarness {
    /// Harness over the shipped inventory with generator extraction.
    pub async fn start() -> Self {
        Self::start_with(ExtractionMode::Generator).await
    }

    pub async fn start_with(mode: ExtractionMode) -> Self {
        let inventory = TableInventory::from_file(TABLES_JSON).unwrap();
        Self::start_with_inventory(inventory, mode).await
    }

    pub async fn start_with_inventory(inventory: TableInventory, mode: ExtractionMode) -> Self {
        let ollama = MockServer::start().await;
        let client = OllamaClient::new(OllamaConfig {
            host: ollama.uri(),
            model: "llama3".into(),
            timeout_secs: 2,
        })
        .unwrap();

        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(client),
            Arc::new(inventory),
            mode,
        ));
        let tts = Arc::new(MockTextToSpeech::new());
        let state = AppState::new(orchestrator).with_text_to_speech(tts.clone());
        let router = build_router(state.clone());

        Self {
            ollama,
            state,
            router,
            tts,
        }
    }

    /// Answer extraction requests (`format: json`) with `content`.
    pub async fn mock_extraction(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"format": "json"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ollama_reply(content)))
            .with_priority(1)
            .mount(&self.ollama)
            .await;
    }

    /// Answer every other chat request with `content`.
    pub async fn mock_phrasing(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ollama_reply(content)))
            .mount(&self.ollama)
            .await;
    }

    /// Make every chat request fail with `status`.
    pub async fn mock_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.ollama)
            .await;
    }

    /// Bodies of every request Ollama received, in order.
    pub async fn ollama_requests(&self) -> Vec<serde_json::Value> {
        self.ollama
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    /// POST /api/v1/turns. Returns (HTTP status code, response JSON body).
    pub async fn send_turn(&self, text: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/turns", serde_json::json!({ "text": text }))
            .await
    }

    /// POST /api/v1/speech.
    pub async fn speak(&self, text: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/speech", serde_json::json!({ "text": text }))
            .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}
