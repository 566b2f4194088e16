//! # Brain Module
//!
//! Intent-based answering for PrepBot. No external model: the classifier is
//! trained at startup from the intents catalog.
//!
//! ## Components
//! - `intents`: Intent store loaded from JSON
//! - `vectorizer`: TF-IDF bag-of-words features
//! - `classifier`: Multinomial logistic regression
//! - `formatter`: Reply assembly from templates and extras
//! - `context_packet`: Languages and the per-turn record
//! - `chatbot`: Main orchestrator

pub mod chatbot;
pub mod classifier;
pub mod context_packet;
pub mod formatter;
pub mod intents;
pub mod vectorizer;

// Re-export main types for convenience
pub use chatbot::Chatbot;
pub use context_packet::Language;
pub use intents::IntentStore;
