//! Topic domain
//!
//! Decides whether a message belongs to the personal-finance domain and
//! whether it asks about the assistant itself.

pub mod classifier;
pub mod vocabulary;

pub use classifier::{Classification, TopicClassifier};
pub use vocabulary::{FINANCE_TOPICS, IDENTITY_PHRASES, Vocabulary};
