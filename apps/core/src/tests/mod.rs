//! Test Module
//!
//! Cross-module test suite for PrepBot.
//!
//! ## Test Categories
//! - `brain_tests`: Vectorizer, classifier and formatter on the bundled catalog
//! - `chatbot_tests`: Full turns, translation flow and the fallback reply
//! - `config_tests`: Environment-driven settings
//! - `preflight_tests`: Catalog checks on files written to a temp dir

pub mod chatbot_tests;
pub mod config_tests;

/// The catalog shipped in `data/intents.json`
pub const BUNDLED_CATALOG: &str = include_str!("../../data/intents.json");
