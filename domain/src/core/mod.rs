//! Core domain concepts shared across all subdomains.
//!
//! - [`message::IncomingMessage`]: a validated, non-empty user message
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod message;
pub mod string;
