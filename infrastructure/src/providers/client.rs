//! Retrying completion client.
//!
//! Drives the [`RetryPolicy`] state machine over a [`ProviderTransport`]:
//! each attempt is bounded by the policy's attempt timeout, transient
//! outcomes are retried after the backoff, and cancellation is observed
//! both while an attempt is in flight and while waiting to retry.

use super::response::interpret;
use super::transport::{ProviderTransport, TransportError};
use async_trait::async_trait;
use finchat_application::CompletionGateway;
use finchat_domain::{
    AttemptOutcome, CompletionFailure, CompletionRequest, CompletionResult, RetryPolicy,
    TransientCause, Transition,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// [`CompletionGateway`] backed by an HTTP provider with bounded retries
pub struct CompletionClient {
    transport: Arc<dyn ProviderTransport>,
    policy: RetryPolicy,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn ProviderTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Run a single attempt, bounded by the attempt timeout.
    async fn attempt(&self, request: &CompletionRequest) -> AttemptOutcome {
        match tokio::time::timeout(self.policy.attempt_timeout, self.transport.send(request)).await
        {
            Ok(Ok(response)) => {
                debug!(status = response.status, "Provider responded");
                interpret(&response)
            }
            Ok(Err(e)) if e.is_transient() => {
                AttemptOutcome::Transient(TransientCause::Network(e.to_string()))
            }
            Ok(Err(e)) => AttemptOutcome::Permanent(CompletionFailure::provider(e.to_string())),
            Err(_) => AttemptOutcome::Transient(TransientCause::Network(
                TransportError::Timeout.to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionGateway for CompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
        cancellation: &CancellationToken,
    ) -> CompletionResult {
        let mut attempt = self.policy.first_attempt();

        loop {
            info!(
                provider = self.transport.name(),
                "Attempt {}/{}", attempt, self.policy.max_attempts
            );

            let outcome = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!("Completion cancelled during attempt {}", attempt);
                    return Err(CompletionFailure::cancelled());
                }
                outcome = self.attempt(request) => outcome,
            };

            match self.policy.transition(attempt, outcome) {
                Transition::Finish(result) => return result,
                Transition::Retry { next, backoff } => {
                    warn!(
                        provider = self.transport.name(),
                        "Attempt {} failed with a transient condition, retrying in {:?}",
                        attempt,
                        backoff
                    );

                    tokio::select! {
                        biased;
                        _ = cancellation.cancelled() => {
                            info!("Completion cancelled while waiting to retry");
                            return Err(CompletionFailure::cancelled());
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }

                    attempt = next;
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.transport.name()
    }
}
