//! Fake Gemini endpoint for client tests.
//!
//! Serves queued responses in order and records every request it receives.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use nithan_config::GeminiConfig;
use nithan_models::GeminiClient;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A request as the fake server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Path segment after `/models/`, e.g. `gemini-2.5-flash:generateContent`
    pub call: String,
    /// Value of the `x-goog-api-key` header
    pub api_key: Option<String>,
    /// JSON body
    pub body: Value,
}

#[derive(Clone, Default)]
struct FakeState {
    responses: Arc<Mutex<VecDeque<(u16, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running fake server.
pub struct FakeGemini {
    state: FakeState,
    base_url: String,
}

impl FakeGemini {
    /// Starts a server on an ephemeral port.
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new()
            .route("/models/:call", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    /// Queues a raw response.
    pub fn respond(&self, status: u16, body: Value) {
        self.state.responses.lock().unwrap().push_back((status, body));
    }

    /// Queues a successful response carrying one text part.
    pub fn respond_text(&self, text: &str) {
        self.respond(
            200,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }]
            }),
        );
    }

    /// Queues a successful response carrying one inline media part.
    pub fn respond_inline(&self, mime_type: &str, data: &str) {
        self.respond(
            200,
            json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "inlineData": { "mimeType": mime_type, "data": data } }]
                    }
                }]
            }),
        );
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Endpoint config pointing at this server.
    pub fn config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.base_url.clone(),
            script_model: "gemini-2.5-flash".to_string(),
            long_script_model: "gemini-2.5-pro".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
        }
    }

    /// Client pointing at this server.
    pub fn client(&self) -> GeminiClient {
        GeminiClient::new("test-key", self.config()).unwrap()
    }
}

async fn handle(
    State(state): State<FakeState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { call, api_key, body });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((500, json!({ "error": { "message": "no response queued" } })));
    (StatusCode::from_u16(status).unwrap(), Json(body))
}
