//! Request and response bodies of the chat API.

use serde::{Deserialize, Serialize};

/// Envelope status of a successful response
pub const STATUS_SUCCESS: &str = "success";
/// Envelope status of an error response
pub const STATUS_FAIL: &str = "fail";

/// `POST /api/chat` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// Missing is treated like an empty message
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
}

impl ChatResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: STATUS_FAIL.to_string(),
        }
    }
}

/// `GET /api/test` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    pub status: String,
    pub message: String,
}

impl Default for TestResponse {
    fn default() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: "CORS is working!".to_string(),
        }
    }
}
