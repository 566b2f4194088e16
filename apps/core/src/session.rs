//! In-memory conversation log.
//!
//! Messages live only as long as the process; nothing is written to disk.

use crate::models::{ChatEntry, Sender};
use chrono::Local;
use uuid::Uuid;

/// Timestamp format used by the history view
const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text shown when no message was exchanged yet
pub const EMPTY_HISTORY: &str = "No conversation history yet.";

/// Ordered log of the messages exchanged in one run
#[derive(Debug, Clone)]
pub struct ChatLog {
    id: String,
    entries: Vec<ChatEntry>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entries: Vec::new(),
        }
    }

    /// Identifier of this conversation, used to correlate log lines
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.push(Sender::User, message.into());
    }

    pub fn push_bot(&mut self, message: impl Into<String>) {
        self.push(Sender::Bot, message.into());
    }

    fn push(&mut self, sender: Sender, message: String) {
        self.entries.push(ChatEntry {
            sender,
            message,
            timestamp: Local::now(),
        });
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chat view: one `You: ...` / `Bot: ...` line per message, no timestamps
    pub fn render_transcript(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.sender.label(), e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// History view: each message prefixed with its local timestamp
    pub fn render_history(&self) -> String {
        if self.is_empty() {
            return EMPTY_HISTORY.to_string();
        }
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} ({}): {}",
                    e.sender.label(),
                    e.timestamp.format(HISTORY_TIME_FORMAT),
                    e.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
