//! Presentation layer for finchat
//!
//! This crate contains the HTTP boundary (axum router, handlers, error
//! envelope) and the CLI definitions.

pub mod cli;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use server::{ApiError, AppState, MAX_BODY_BYTES, create_router, serve};
