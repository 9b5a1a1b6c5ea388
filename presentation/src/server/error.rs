//! Mapping of chat failures to HTTP responses.
//!
//! Every failure is rendered as `{"error": ..., "status": "fail"}` with a
//! fixed, user-facing message. Provider details stay in the logs.

use super::types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finchat_application::{ChatError, ValidationIssue};
use std::fmt;
use tracing::{error, warn};

pub const EMPTY_MESSAGE: &str = "Message cannot be empty";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const MODEL_LOADING: &str = "The model is still loading. Please try again in a minute.";
pub const NO_RESPONSE: &str =
    "Failed to get a response after multiple attempts. Please try again later.";
pub const SERVICE_UNAVAILABLE: &str =
    "The AI service is currently unavailable. Please try again later.";
pub const INVALID_API_KEY: &str = "Invalid API key configuration";
pub const RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";
pub const CANCELLED: &str = "Request cancelled";
pub const INTERNAL: &str = "An internal server error occurred";

/// Non-standard "client closed request" status
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// An error response of the chat API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status_code: StatusCode, message: &'static str) -> Self {
        Self {
            status_code,
            message,
        }
    }

    /// Map a body extraction failure.
    ///
    /// Oversized bodies keep their 413; every other rejection (syntax,
    /// wrong shape, missing content type) is reported as invalid JSON.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Rejected oversized request body");
            return Self::new(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE);
        }
        warn!("Rejected request body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, INVALID_JSON)
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(ValidationIssue::EmptyMessage) => {
                Self::new(StatusCode::BAD_REQUEST, EMPTY_MESSAGE)
            }
            ChatError::ModelUnavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, MODEL_LOADING)
            }
            ChatError::Network(_) => Self::new(StatusCode::SERVICE_UNAVAILABLE, NO_RESPONSE),
            ChatError::Provider(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, SERVICE_UNAVAILABLE)
            }
            ChatError::Unauthorized(_) => Self::new(StatusCode::UNAUTHORIZED, INVALID_API_KEY),
            ChatError::RateLimited(_) => Self::new(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED),
            ChatError::Cancelled => Self::new(
                StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                    .unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
                CANCELLED,
            ),
            // Normally answered with the apology text before reaching here
            ChatError::EmptyGeneration | ChatError::Internal(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code.as_u16(), self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            error!("API error: {}", self);
        } else {
            warn!("API error: {}", self);
        }
        (self.status_code, Json(ErrorResponse::fail(self.message))).into_response()
    }
}
