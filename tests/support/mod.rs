// Mock decision service shared by the integration tests.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{collections::VecDeque, sync::Arc, time::Duration};
use tokio::sync::Mutex;

// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    // Queued replies; an empty queue answers with the idle/empty default.
    next_moves: VecDeque<Value>,
    pulls: VecDeque<Value>,
    commands: VecDeque<Value>,
    // When set, every route answers with this status.
    fail_status: Option<u16>,
}

#[derive(Clone)]
pub struct MockService {
    base_url: String,
    state: Arc<Mutex<MockState>>,
}

// Start a mock on an ephemeral port inside the current test runtime.
pub async fn spawn_mock() -> MockService {
    let state = Arc::new(Mutex::new(MockState::default()));

    let app = Router::new()
        .route("/v1/report", post(ack))
        .route("/v1/mc/state", post(ack))
        .route("/v1/mc/events", post(ack))
        .route("/v1/discord/unmute", post(ack))
        .route("/v1/mc/next_move", post(next_move))
        .route("/v1/pull", post(pull))
        .route("/v1/mc/commands", get(commands))
        .with_state(state.clone());

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock service failed");
    });

    MockService {
        base_url: format!("http://{}", addr),
        state,
    }
}

impl MockService {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn queue_next_move(&self, reply: Value) {
        self.state.lock().await.next_moves.push_back(reply);
    }

    pub async fn queue_pull(&self, reply: Value) {
        self.state.lock().await.pulls.push_back(reply);
    }

    pub async fn queue_commands(&self, reply: Value) {
        self.state.lock().await.commands.push_back(reply);
    }

    pub async fn fail_with(&self, status: u16) {
        self.state.lock().await.fail_status = Some(status);
    }

    // Bodies received on `path`, oldest first.
    pub async fn bodies(&self, path: &str) -> Vec<Value> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.body.clone())
            .collect()
    }

    // Wait until `path` has seen at least `count` requests and return their bodies.
    pub async fn wait_for(&self, path: &str, count: usize) -> Vec<Value> {
        for _ in 0..500 {
            let bodies = self.bodies(path).await;
            if bodies.len() >= count {
                return bodies;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("mock never received {count} request(s) on {path}");
    }

    // Wait for the first body on `path` matching `pred`.
    pub async fn wait_for_match<F>(&self, path: &str, pred: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        for _ in 0..500 {
            if let Some(body) = self.bodies(path).await.into_iter().find(|b| pred(b)) {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("mock never received a matching request on {path}");
    }
}

type Shared = Arc<Mutex<MockState>>;

// Record the request; answer with the forced failure status if one is set.
async fn record(state: &Shared, path: &str, body: Value) -> Option<Response> {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        path: path.to_string(),
        body,
    });
    state.fail_status.map(|status| {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({"message": "forced failure"}))).into_response()
    })
}

// Fire-and-forget routes: the reply body is ignored by the bridge.
async fn ack(State(state): State<Shared>, uri: Uri, Json(body): Json<Value>) -> Response {
    if let Some(failure) = record(&state, uri.path(), body).await {
        return failure;
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn next_move(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = record(&state, "/v1/mc/next_move", body).await {
        return failure;
    }
    let reply = state.lock().await.next_moves.pop_front();
    Json(reply.unwrap_or_else(|| json!({"type": "idle"}))).into_response()
}

async fn pull(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = record(&state, "/v1/pull", body).await {
        return failure;
    }
    let reply = state.lock().await.pulls.pop_front();
    Json(reply.unwrap_or_else(|| json!({"commands": []}))).into_response()
}

async fn commands(State(state): State<Shared>) -> Response {
    if let Some(failure) = record(&state, "/v1/mc/commands", Value::Null).await {
        return failure;
    }
    let reply = state.lock().await.commands.pop_front();
    Json(reply.unwrap_or_else(|| json!({"commands": []}))).into_response()
}
