//! Application layer for finchat
//!
//! This crate contains the chat use case, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationSettings;
pub use ports::{
    completion_gateway::CompletionGateway,
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
};
pub use use_cases::handle_chat::{ChatError, HandleChatUseCase, ValidationIssue};
