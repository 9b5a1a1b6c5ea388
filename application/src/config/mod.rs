//! Application-level configuration.
//!
//! - [`GenerationSettings`]: model and sampling parameters for completion requests

pub mod generation_settings;

pub use generation_settings::GenerationSettings;
