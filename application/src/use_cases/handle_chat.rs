//! Handle Chat use case.
//!
//! Answers one user message:
//!
//! 1. Validate (non-empty after trimming)
//! 2. Classify against the topic vocabulary
//! 3. Off-topic → fixed refusal, identity → fixed identity text (no provider call)
//! 4. Otherwise build the advisor prompt and ask the [`CompletionGateway`]
//!
//! Retries happen inside the gateway; this use case only sees the final
//! result and maps it to a [`ChatError`].

use crate::config::GenerationSettings;
use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use finchat_domain::{
    ChatReply, CompletionFailure, FailureKind, IncomingMessage, PromptBuilder, TopicClassifier,
    preview,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input problems detected before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Message missing or blank
    EmptyMessage,
}

impl ValidationIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationIssue::EmptyMessage => "empty_message",
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while handling a chat message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Validation error: {0}")]
    Validation(ValidationIssue),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Provider rate limit hit: {0}")]
    RateLimited(String),

    #[error("Provider returned no usable text")]
    EmptyGeneration,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Stable identifier used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Validation(_) => "validation_error",
            ChatError::ModelUnavailable(_) => "model_unavailable",
            ChatError::Network(_) => "network_error",
            ChatError::Provider(_) => "provider_error",
            ChatError::Unauthorized(_) => "unauthorized",
            ChatError::RateLimited(_) => "rate_limited",
            ChatError::EmptyGeneration => "empty_generation",
            ChatError::Cancelled => "cancelled",
            ChatError::Internal(_) => "internal_error",
        }
    }
}

impl From<CompletionFailure> for ChatError {
    fn from(failure: CompletionFailure) -> Self {
        match failure.kind {
            FailureKind::ModelUnavailable => ChatError::ModelUnavailable(failure.message),
            FailureKind::NetworkError => ChatError::Network(failure.message),
            FailureKind::ProviderError => ChatError::Provider(failure.message),
            FailureKind::Unauthorized => ChatError::Unauthorized(failure.message),
            FailureKind::RateLimited => ChatError::RateLimited(failure.message),
            FailureKind::EmptyGeneration => ChatError::EmptyGeneration,
            FailureKind::Cancelled => ChatError::Cancelled,
        }
    }
}

/// Use case for answering a single chat message.
///
/// Holds only shared, read-only state, so one instance serves any number of
/// concurrent requests.
#[derive(Clone)]
pub struct HandleChatUseCase {
    gateway: Arc<dyn CompletionGateway>,
    classifier: TopicClassifier,
    settings: Arc<GenerationSettings>,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl HandleChatUseCase {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        classifier: TopicClassifier,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            gateway,
            classifier,
            settings: Arc::new(settings),
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    /// Create with an exchange logger.
    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    /// Handle a message with no external cancellation.
    ///
    /// Dropping the returned future still aborts the provider call.
    pub async fn execute(&self, raw_message: &str) -> Result<ChatReply, ChatError> {
        self.execute_cancellable(raw_message, &CancellationToken::new())
            .await
    }

    /// Handle a message; cancelling `cancellation` aborts the provider call
    /// and skips any remaining retries.
    pub async fn execute_cancellable(
        &self,
        raw_message: &str,
        cancellation: &CancellationToken,
    ) -> Result<ChatReply, ChatError> {
        let started = Instant::now();
        let (result, message_chars) = match IncomingMessage::parse(raw_message) {
            Ok(message) => (
                self.answer(&message, cancellation).await,
                message.char_count(),
            ),
            Err(_) => (Err(ChatError::Validation(ValidationIssue::EmptyMessage)), 0),
        };
        self.log_exchange(&result, started.elapsed(), message_chars);
        result
    }

    async fn answer(
        &self,
        message: &IncomingMessage,
        cancellation: &CancellationToken,
    ) -> Result<ChatReply, ChatError> {
        info!("Processing message: {}", preview(message.content(), 50));

        let classification = self.classifier.classify(message.content());
        if classification.is_off_topic() {
            debug!("No finance topic found, refusing");
            return Ok(ChatReply::off_topic());
        }
        if classification.is_identity {
            debug!(matched = ?classification.matched, "Identity question");
            return Ok(ChatReply::identity());
        }
        debug!(matched = ?classification.matched, "Finance topic found");

        let prompt = PromptBuilder::build(message.content())
            .map_err(|e| ChatError::Internal(e.to_string()))?;
        let request = self.settings.request_for(prompt);

        match self.gateway.complete(&request, cancellation).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("Gateway returned blank text");
                Err(ChatError::EmptyGeneration)
            }
            Ok(text) => {
                info!(
                    provider = self.gateway.provider_name(),
                    "Generated response ({} chars)",
                    text.chars().count()
                );
                Ok(ChatReply::generated(text))
            }
            Err(failure) => {
                warn!(
                    provider = self.gateway.provider_name(),
                    kind = %failure.kind,
                    "Completion failed: {}",
                    failure.message
                );
                Err(failure.into())
            }
        }
    }

    fn log_exchange(
        &self,
        result: &Result<ChatReply, ChatError>,
        latency: Duration,
        message_chars: usize,
    ) {
        let event = match result {
            Ok(reply) => ExchangeEvent::answered(reply.kind, latency, message_chars),
            Err(e) => ExchangeEvent::failed(e.kind(), latency, message_chars),
        };
        self.exchange_logger.log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finchat_domain::{
        CompletionRequest, CompletionResult, IDENTITY_RESPONSE, NON_FINANCE_RESPONSE, ReplyKind,
        Vocabulary,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockGateway {
        results: Mutex<VecDeque<CompletionResult>>,
        calls: AtomicUsize,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl MockGateway {
        fn new(results: Vec<CompletionResult>) -> Self {
            Self {
                results: Mutex::new(VecDeque::from(results)),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn complete(
            &self,
            request: &CompletionRequest,
            _cancellation: &CancellationToken,
        ) -> CompletionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompletionFailure::provider("no scripted result")))
        }

        fn provider_name(&self) -> &str {
            "mock"
        }
    }

    /// Gateway that only resolves once cancelled.
    struct HangingGateway;

    #[async_trait]
    impl CompletionGateway for HangingGateway {
        async fn complete(
            &self,
            _request: &CompletionRequest,
            cancellation: &CancellationToken,
        ) -> CompletionResult {
            cancellation.cancelled().await;
            Err(CompletionFailure::cancelled())
        }

        fn provider_name(&self) -> &str {
            "hanging"
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ExchangeEvent>>,
    }

    impl ExchangeLogger for RecordingLogger {
        fn log(&self, event: ExchangeEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn use_case(gateway: Arc<MockGateway>) -> HandleChatUseCase {
        HandleChatUseCase::new(
            gateway,
            TopicClassifier::default(),
            GenerationSettings::default().with_model("test-model"),
        )
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_empty_and_blank_messages_are_rejected_without_calls() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let uc = use_case(gateway.clone());

        for raw in ["", "   ", "\n\t"] {
            let err = uc.execute(raw).await.unwrap_err();
            assert_eq!(err, ChatError::Validation(ValidationIssue::EmptyMessage));
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_in_domain_question_calls_gateway_once() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(
            "Aim for at least the employer match.".to_string()
        )]));
        let uc = use_case(gateway.clone());

        let reply = uc
            .execute("What's a good 401k contribution rate?")
            .await
            .unwrap();

        assert_eq!(reply.kind, ReplyKind::Generated);
        assert_eq!(reply.text, "Aim for at least the employer match.");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_request_is_built_from_prompt_and_settings() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("Pay down debt first.".to_string())]));
        let uc = use_case(gateway.clone());

        uc.execute("  Should I pay off debt or invest?  ").await.unwrap();

        let request = gateway.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "test-model");
        assert_eq!(
            request.system_instruction,
            PromptBuilder::system_instruction()
        );
        assert!(
            request
                .user_prompt
                .contains("Question: Should I pay off debt or invest?\n\nAnswer:")
        );
    }

    #[tokio::test]
    async fn test_identity_question_short_circuits() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let uc = use_case(gateway.clone());

        let reply = uc.execute("who are you?").await.unwrap();

        assert_eq!(reply.text, IDENTITY_RESPONSE);
        assert_eq!(reply.kind, ReplyKind::Identity);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_off_topic_question_is_refused() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let uc = use_case(gateway.clone());

        let reply = uc.execute("What's the weather today?").await.unwrap();

        assert_eq!(reply.text, NON_FINANCE_RESPONSE);
        assert_eq!(reply.kind, ReplyKind::OffTopic);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_kinds_map_to_chat_errors() {
        let cases = vec![
            (
                CompletionFailure::model_unavailable("loading"),
                ChatError::ModelUnavailable("loading".to_string()),
            ),
            (
                CompletionFailure::network("timeout"),
                ChatError::Network("timeout".to_string()),
            ),
            (
                CompletionFailure::provider("400: bad"),
                ChatError::Provider("400: bad".to_string()),
            ),
            (
                CompletionFailure::new(FailureKind::Unauthorized, "401"),
                ChatError::Unauthorized("401".to_string()),
            ),
            (CompletionFailure::empty_generation(), ChatError::EmptyGeneration),
        ];

        for (failure, expected) in cases {
            let gateway = Arc::new(MockGateway::new(vec![Err(failure)]));
            let uc = use_case(gateway);
            let err = uc.execute("budget help").await.unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn test_blank_generation_is_empty_generation() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("   ".to_string())]));
        let uc = use_case(gateway);
        let err = uc.execute("savings tips").await.unwrap_err();
        assert_eq!(err, ChatError::EmptyGeneration);
    }

    #[tokio::test]
    async fn test_cancellation_reaches_gateway() {
        let uc = HandleChatUseCase::new(
            Arc::new(HangingGateway),
            TopicClassifier::default(),
            GenerationSettings::default(),
        );
        let token = CancellationToken::new();
        let canceller = token.clone();
        let handle = tokio::spawn(async move {
            uc.execute_cancellable("mortgage question", &token).await
        });

        canceller.cancel();
        let result = handle.await.unwrap();
        assert_eq!(result.unwrap_err(), ChatError::Cancelled);
    }

    #[tokio::test]
    async fn test_custom_vocabulary_is_used() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("Compare premiums.".to_string())]));
        let vocab = Vocabulary::personal_finance().with_extra_topics(["annuity"]);
        let uc = HandleChatUseCase::new(
            gateway.clone(),
            TopicClassifier::new(vocab),
            GenerationSettings::default(),
        );

        let reply = uc.execute("Is an annuity worth it?").await.unwrap();
        assert_eq!(reply.kind, ReplyKind::Generated);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_every_exchange_is_logged() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("Start with an index fund.".to_string())]));
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(gateway).with_exchange_logger(logger.clone());

        uc.execute("  investing basics ").await.unwrap();
        uc.execute("who are you").await.unwrap();
        uc.execute("").await.unwrap_err();

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].reply_kind, Some(ReplyKind::Generated));
        assert_eq!(events[0].outcome, "success");
        assert_eq!(events[0].message_chars, 16);
        assert_eq!(events[1].reply_kind, Some(ReplyKind::Identity));
        assert_eq!(events[2].reply_kind, None);
        assert_eq!(events[2].outcome, "validation_error");
        assert_eq!(events[2].message_chars, 0);
    }

    #[tokio::test]
    async fn test_failed_exchange_is_logged_with_error_kind() {
        let gateway = Arc::new(MockGateway::new(vec![Err(
            CompletionFailure::model_unavailable("loading"),
        )]));
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(gateway).with_exchange_logger(logger.clone());

        uc.execute("épargne budget").await.unwrap_err();

        let events = logger.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![ExchangeEvent {
                reply_kind: None,
                outcome: "model_unavailable",
                latency: events[0].latency,
                message_chars: 14,
            }]
        );
    }
}
