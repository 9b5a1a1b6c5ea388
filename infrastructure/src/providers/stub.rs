//! In-process HTTP provider stub for transport tests.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const LOADING_BODY: &str = r#"{"error": "Model test-model is currently loading", "estimated_time": 20.0}"#;

/// How the stub answers
#[derive(Debug, Clone)]
pub enum Script {
    /// Same status and body for every request
    Fixed(u16, &'static str),
    /// 503 "loading" for the first `n` requests, then 200 with the body
    LoadingThen(usize, &'static str),
}

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

struct StubState {
    script: Script,
    hits: AtomicUsize,
    requests: Mutex<Vec<ReceivedRequest>>,
}

pub struct StubServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(script: Script) -> Self {
        let state = Arc::new(StubState {
            script,
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state, task }
    }

    /// Base URL of an address nothing listens on
    pub async fn unused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ReceivedRequest> {
        self.state.requests.lock().unwrap().last().cloned()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(ReceivedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, body) = match &state.script {
        Script::Fixed(status, body) => (*status, *body),
        Script::LoadingThen(failures, _) if hit < *failures => (503, LOADING_BODY),
        Script::LoadingThen(_, body) => (200, *body),
    };

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body.to_string(),
    )
}
