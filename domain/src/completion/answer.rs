//! Extraction of the answer from generated text.

use crate::prompt::ANSWER_MARKER;

/// Strip an echoed prompt from generated text.
///
/// Providers that return the full text repeat the prompt, which ends with
/// the `Answer:` marker. Only what follows the last marker is kept. Text
/// without a marker is returned trimmed. Applying this twice gives the
/// same result as applying it once.
pub fn extract_answer(generated: &str) -> String {
    let tail = match generated.rfind(ANSWER_MARKER) {
        Some(idx) => &generated[idx + ANSWER_MARKER.len()..],
        None => generated,
    };
    tail.trim().to_string()
}
