//! HTTP server for the chat API
//!
//! - POST /api/chat - Answer one message
//! - POST /chat - Legacy alias of /api/chat
//! - GET /api/test - CORS smoke test

pub mod error;
mod handlers;
pub mod types;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use finchat_application::HandleChatUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::ApiError;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// How long browsers may cache a preflight response
const CORS_MAX_AGE: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<HandleChatUseCase>,
    /// Cancelled on shutdown; in-flight provider calls stop waiting
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(use_case: HandleChatUseCase, shutdown: CancellationToken) -> Self {
        Self {
            use_case: Arc::new(use_case),
            shutdown,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter(|o| {
            if *o == "*" {
                warn!("Ignoring wildcard CORS origin; credentialed requests need explicit origins");
                return false;
            }
            true
        })
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/api/test", get(handlers::test_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` is cancelled, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
