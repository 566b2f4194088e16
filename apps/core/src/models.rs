use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single intent of the catalog: labeled example phrases plus canned replies.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct IntentDefinition {
    /// The label predicted by the classifier (e.g. "greeting").
    #[validate(length(min = 1))]
    pub tag: String,
    /// Example phrases used as training samples for this tag.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Reply templates; one is picked at random per answer.
    #[serde(default)]
    pub responses: Vec<String>,
    /// Optional structured content appended to the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<AdditionalInfo>,
}

/// Extra content attached to an intent, rendered after the chosen response.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AdditionalInfo {
    /// Sample interview questions with an answer or a suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ExampleQa>>,
    /// Links to further reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
}

/// A sample question, answered either by `sample_answer` or `suggestion`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExampleQa {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ExampleQa {
    /// The answer shown next to the question: sample answer first, then suggestion.
    pub fn answer(&self) -> &str {
        self.sample_answer
            .as_deref()
            .or(self.suggestion.as_deref())
            .unwrap_or("")
    }
}

/// A titled link.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Resource {
    pub topic: String,
    pub url: String,
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Label used when rendering the conversation.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

/// Represents a single message of the in-memory conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// The author of the message.
    pub sender: Sender,
    /// The text content of the message.
    pub message: String,
    /// Local time at which the message was recorded.
    pub timestamp: DateTime<Local>,
}
