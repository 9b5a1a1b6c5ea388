//! Exchange logging: one machine-readable record per handled chat message.
//!
//! Provides [`JsonlExchangeLogger`], a JSONL file writer that implements
//! the [`ExchangeLogger`](finchat_application::ExchangeLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlExchangeLogger;
