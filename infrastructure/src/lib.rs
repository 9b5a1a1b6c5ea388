//! Infrastructure layer for finchat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP completion providers with retry, configuration
//! file loading, and the JSONL exchange log.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlExchangeLogger;
pub use providers::{
    CompletionClient, ProviderKind, ProviderTransport, RawResponse, TransportError,
    build_http_client,
};
