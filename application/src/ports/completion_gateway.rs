//! Completion Gateway port
//!
//! Defines the interface for requesting text from a completion provider.

use async_trait::async_trait;
use finchat_domain::{CompletionRequest, CompletionResult};
use tokio_util::sync::CancellationToken;

/// Gateway to an LLM completion provider
///
/// Implementations own timeouts and retries: a call returns only once a
/// final result is known. Cancelling `cancellation` must stop the in-flight
/// call and any pending retries, resolving to a `Cancelled` failure.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
        cancellation: &CancellationToken,
    ) -> CompletionResult;

    /// Short provider name for logs (e.g. "huggingface")
    fn provider_name(&self) -> &str;
}
