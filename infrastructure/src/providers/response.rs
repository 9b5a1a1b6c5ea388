//! Interpretation of provider responses.
//!
//! Turns a [`RawResponse`] into an [`AttemptOutcome`] for the retry state
//! machine: loading conditions are transient, other error statuses are
//! permanent, and success bodies are parsed for generated text.

use super::transport::RawResponse;
use finchat_domain::{
    AttemptOutcome, CompletionFailure, FailureKind, TransientCause, extract_answer, preview,
};
use serde_json::Value;

/// Longest body excerpt kept in failure messages
const BODY_EXCERPT_CHARS: usize = 200;

/// Classify one provider response.
pub fn interpret(response: &RawResponse) -> AttemptOutcome {
    if is_loading(response) {
        return AttemptOutcome::Transient(TransientCause::ModelLoading(format!(
            "{}: {}",
            response.status,
            preview(&response.body, BODY_EXCERPT_CHARS)
        )));
    }

    if !response.is_success() {
        return AttemptOutcome::Permanent(status_failure(response));
    }

    let Ok(json) = serde_json::from_str::<Value>(&response.body) else {
        return AttemptOutcome::Permanent(CompletionFailure::provider(format!(
            "unexpected response format: {}",
            preview(&response.body, BODY_EXCERPT_CHARS)
        )));
    };

    match generated_text(&json) {
        Some(text) => {
            let answer = extract_answer(text);
            if answer.is_empty() {
                AttemptOutcome::Permanent(CompletionFailure::empty_generation())
            } else {
                AttemptOutcome::Generated(answer)
            }
        }
        None => AttemptOutcome::Permanent(CompletionFailure::provider(format!(
            "unexpected response format: {}",
            preview(&response.body, BODY_EXCERPT_CHARS)
        ))),
    }
}

/// Whether the provider says the model is still being loaded.
///
/// A 503 always counts. Other error statuses count when the body mentions
/// "loading". A success status only counts when the body is an error
/// object mentioning it, so generated advice that happens to contain the
/// word is not mistaken for a loading notice.
pub fn is_loading(response: &RawResponse) -> bool {
    if response.status == 503 {
        return true;
    }
    if !response.is_success() {
        return response.body.to_lowercase().contains("loading");
    }
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(Value::as_str)
                .map(|e| e.to_lowercase().contains("loading"))
        })
        .unwrap_or(false)
}

/// Pull the generated text out of either supported body shape.
///
/// - text generation: `[{"generated_text": "..."}]` (or a single object)
/// - chat completion: `{"choices": [{"message": {"content": "..."}}]}`
///
/// A generation list whose first element has no text yields `Some("")`.
fn generated_text(json: &Value) -> Option<&str> {
    match json {
        Value::Array(items) => {
            let first = items.first()?;
            Some(
                first
                    .get("generated_text")
                    .and_then(Value::as_str)
                    .unwrap_or(""),
            )
        }
        Value::Object(map) => {
            if let Some(choice) = map
                .get("choices")
                .and_then(Value::as_array)
                .and_then(|c| c.first())
            {
                return Some(
                    choice
                        .pointer("/message/content")
                        .or_else(|| choice.get("text"))
                        .and_then(Value::as_str)
                        .unwrap_or(""),
                );
            }
            map.get("generated_text").and_then(Value::as_str)
        }
        _ => None,
    }
}

fn status_failure(response: &RawResponse) -> CompletionFailure {
    let message = format!(
        "Error {}: {}",
        response.status,
        preview(&response.body, BODY_EXCERPT_CHARS)
    );
    let kind = match response.status {
        401 | 403 => FailureKind::Unauthorized,
        429 => FailureKind::RateLimited,
        _ => FailureKind::ProviderError,
    };
    CompletionFailure::new(kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> RawResponse {
        RawResponse::new(200, body)
    }

    fn permanent_kind(outcome: AttemptOutcome) -> FailureKind {
        match outcome {
            AttemptOutcome::Permanent(f) => f.kind,
            other => panic!("expected permanent failure, got {other:?}"),
        }
    }

    #[test]
    fn test_generation_list_strips_prompt() {
        let body = r#"[{"generated_text": "You are... Question: How to budget?\n\nAnswer: Track every expense."}]"#;
        assert_eq!(
            interpret(&ok(body)),
            AttemptOutcome::Generated("Track every expense.".to_string())
        );
    }

    #[test]
    fn test_chat_completion_shape() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": " Max out the employer match. "}}]}"#;
        assert_eq!(
            interpret(&ok(body)),
            AttemptOutcome::Generated("Max out the employer match.".to_string())
        );
    }

    #[test]
    fn test_legacy_completion_text_shape() {
        let body = r#"{"choices": [{"text": "Answer: Refinance."}]}"#;
        assert_eq!(
            interpret(&ok(body)),
            AttemptOutcome::Generated("Refinance.".to_string())
        );
    }

    #[test]
    fn test_single_generation_object() {
        let body = r#"{"generated_text": "Spread risk."}"#;
        assert_eq!(
            interpret(&ok(body)),
            AttemptOutcome::Generated("Spread risk.".to_string())
        );
    }

    #[test]
    fn test_empty_after_stripping_is_empty_generation() {
        let body = r#"[{"generated_text": "Question: x\n\nAnswer:  "}]"#;
        assert_eq!(
            permanent_kind(interpret(&ok(body))),
            FailureKind::EmptyGeneration
        );
        assert_eq!(
            permanent_kind(interpret(&ok(r#"[{}]"#))),
            FailureKind::EmptyGeneration
        );
    }

    #[test]
    fn test_unexpected_shapes_are_provider_errors() {
        for body in ["[]", "{}", "\"text\"", "not json"] {
            assert_eq!(
                permanent_kind(interpret(&ok(body))),
                FailureKind::ProviderError,
                "{body}"
            );
        }
    }

    #[test]
    fn test_503_is_loading() {
        let outcome = interpret(&RawResponse::new(503, "Service Unavailable"));
        assert!(matches!(
            outcome,
            AttemptOutcome::Transient(TransientCause::ModelLoading(_))
        ));
    }

    #[test]
    fn test_loading_error_body_is_transient() {
        let body = r#"{"error": "Model bigscience/bloom is currently loading", "estimated_time": 20.0}"#;
        assert!(is_loading(&RawResponse::new(500, body)));
        assert!(is_loading(&ok(body)));
    }

    #[test]
    fn test_generated_text_mentioning_loading_is_not_transient() {
        let body = r#"[{"generated_text": "Answer: Avoid loading up on credit card debt."}]"#;
        assert!(!is_loading(&ok(body)));
        assert_eq!(
            interpret(&ok(body)),
            AttemptOutcome::Generated("Avoid loading up on credit card debt.".to_string())
        );
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            permanent_kind(interpret(&RawResponse::new(401, "bad token"))),
            FailureKind::Unauthorized
        );
        assert_eq!(
            permanent_kind(interpret(&RawResponse::new(403, ""))),
            FailureKind::Unauthorized
        );
        assert_eq!(
            permanent_kind(interpret(&RawResponse::new(429, "slow down"))),
            FailureKind::RateLimited
        );
        match interpret(&RawResponse::new(400, "bad input")) {
            AttemptOutcome::Permanent(f) => {
                assert_eq!(f.kind, FailureKind::ProviderError);
                assert_eq!(f.message, "Error 400: bad input");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
