#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ollama_chat_relay::config::Config;
use ollama_chat_relay::routes::create_router;
use ollama_chat_relay::state::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt;

/// Canned answers for a stand-in Ollama server.
#[derive(Clone)]
pub struct FakeOllama {
    pub tags: (StatusCode, Value),
    pub generate: (StatusCode, Value),
    pub delay: Duration,
    pub calls: Arc<Mutex<Vec<Value>>>,
}

impl Default for FakeOllama {
    fn default() -> Self {
        Self {
            tags: (StatusCode::OK, json!({ "models": [] })),
            generate: (StatusCode::OK, json!({ "response": "ok" })),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeOllama {
    pub fn with_models(mut self, names: &[&str]) -> Self {
        let models: Vec<Value> = names.iter().map(|n| json!({ "name": n, "size": 42 })).collect();
        self.tags = (StatusCode::OK, json!({ "models": models }));
        self
    }

    pub fn replying(mut self, status: StatusCode, body: Value) -> Self {
        self.generate = (status, body);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Bodies received on `/api/generate`, oldest first.
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the base url.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/tags", get(tags))
            .route("/api/generate", post(generate))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn tags(State(fake): State<FakeOllama>) -> (StatusCode, Json<Value>) {
    (fake.tags.0, Json(fake.tags.1))
}

async fn generate(State(fake): State<FakeOllama>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push(body);
    tokio::time::sleep(fake.delay).await;
    (fake.generate.0, Json(fake.generate.1))
}

/// A url nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(ollama_url: &str) -> Config {
    Config {
        ollama_url: ollama_url.to_string(),
        list_timeout: Duration::from_millis(500),
        generate_timeout: Duration::from_millis(500),
        ..Config::default()
    }
}

pub fn app_for(ollama_url: &str) -> Router {
    let state = Arc::new(AppState::new(&test_config(ollama_url)));
    create_router().with_state(state)
}

pub fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, value)
}
