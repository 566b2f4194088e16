//! Context Packet - Output structure of one chatbot turn.
//!
//! Records what the user typed, what the classifier saw, what it predicted
//! and what the bot answered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::classifier::Prediction;
use crate::error::AppError;

/// Languages offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Spanish,
    French,
    Hindi,
    German,
    ChineseSimplified,
}

impl Language {
    /// Every supported language, in menu order
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Hindi,
        Language::German,
        Language::ChineseSimplified,
    ];

    /// Returns the language code understood by translation services
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Hindi => "hi",
            Language::German => "de",
            Language::ChineseSimplified => "zh-cn",
        }
    }

    /// Returns the human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Hindi => "Hindi",
            Language::German => "German",
            Language::ChineseSimplified => "Chinese (Simplified)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Language {
    type Err = AppError;

    /// Accepts either the code ("zh-cn") or the name ("Chinese (Simplified)").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted || lang.name().to_lowercase() == wanted)
            .ok_or_else(|| AppError::Config(format!("unsupported language '{}'", s.trim())))
    }
}

/// Complete record of a chatbot turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPacket {
    /// Original user input
    pub query: String,

    /// Input after translation to English (equal to `query` for English users)
    pub english_query: String,

    /// Language of the user
    pub language: Language,

    /// Classifier output, absent if the turn failed before prediction
    pub prediction: Option<Prediction>,

    /// Most likely tags with their probabilities, best first
    pub candidates: Vec<(String, f64)>,

    /// Final reply shown to the user
    pub reply: String,

    /// Whether `reply` is the fallback apology
    pub failed: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of the turn
    pub timestamp: DateTime<Utc>,
}

impl ContextPacket {
    /// Create a new empty context packet
    pub fn new(query: String, language: Language) -> Self {
        Self {
            english_query: query.clone(),
            query,
            language,
            prediction: None,
            candidates: Vec::new(),
            reply: String::new(),
            failed: false,
            processing_time_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        match &self.prediction {
            Some(p) => format!(
                "Intent: {} ({:.0}%), Language: {}, Failed: {}, {}ms",
                p.tag,
                p.confidence * 100.0,
                self.language.code(),
                self.failed,
                self.processing_time_ms
            ),
            None => format!(
                "Intent: none, Language: {}, Failed: {}, {}ms",
                self.language.code(),
                self.failed,
                self.processing_time_ms
            ),
        }
    }
}
