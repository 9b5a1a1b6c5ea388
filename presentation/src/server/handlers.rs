//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::types::{ChatRequest, ChatResponse, TestResponse};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use finchat_application::ChatError;
use finchat_domain::EMPTY_GENERATION_RESPONSE;
use tracing::debug;

/// `POST /api/chat` and `POST /chat`
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::from_rejection)?;
    let message = request.message.unwrap_or_default();

    // Aborted on shutdown; dropping this future on client disconnect
    // aborts the provider call as well.
    let cancellation = state.shutdown.child_token();

    match state
        .use_case
        .execute_cancellable(&message, &cancellation)
        .await
    {
        Ok(reply) => {
            debug!(kind = %reply.kind, "Replying");
            Ok(Json(ChatResponse::success(reply.text)))
        }
        Err(ChatError::EmptyGeneration) => {
            Ok(Json(ChatResponse::success(EMPTY_GENERATION_RESPONSE)))
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /api/test`
pub async fn test_handler() -> Json<TestResponse> {
    Json(TestResponse::default())
}
