//! Chatbot Tests
//!
//! Full conversation turns on the bundled catalog, with mock translators
//! standing in for a real translation backend.

use super::BUNDLED_CATALOG;
use crate::brain::chatbot::FALLBACK_REPLY;
use crate::brain::{Chatbot, IntentStore, Language};
use crate::config::Settings;
use crate::error::AppError;
use crate::session::ChatLog;
use crate::translator::Translator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Fixtures
// ============================================================================

fn seeded_bot() -> Chatbot {
    let settings = Settings {
        seed: Some(2024),
        ..Settings::default()
    };
    Chatbot::train(IntentStore::from_json(BUNDLED_CATALOG).unwrap(), &settings).unwrap()
}

type Call = (String, Language, Language);

/// Dictionary-based translator that records every call
struct MockTranslator {
    to_english: HashMap<&'static str, &'static str>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockTranslator {
    fn new(calls: Arc<Mutex<Vec<Call>>>) -> Self {
        let mut to_english = HashMap::new();
        to_english.insert("hola", "hello");
        to_english.insert("¿cómo negocio mi salario?", "how do I negotiate my salary?");
        Self { to_english, calls }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source, target));

        if target == Language::English {
            Ok(self
                .to_english
                .get(text.to_lowercase().as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| text.to_string()))
        } else {
            Ok(format!("[{}] {}", target.code(), text))
        }
    }
}

/// Translator whose backend is always down
struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, AppError> {
        Err(AppError::Translation("service unavailable".to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_english_turn_skips_translation() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let bot = seeded_bot().with_translator(Arc::new(MockTranslator::new(calls.clone())));

    let packet = bot.process("hello", Language::English).await;

    assert!(!packet.failed);
    assert_eq!(packet.prediction.as_ref().unwrap().tag, "greeting");
    let greeting = bot.store().find("greeting").unwrap();
    assert!(greeting.responses.contains(&packet.reply));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_spanish_turn_translates_both_ways() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let bot = seeded_bot().with_translator(Arc::new(MockTranslator::new(calls.clone())));

    let packet = bot.process("Hola", Language::Spanish).await;

    assert!(!packet.failed);
    assert_eq!(packet.english_query, "hello");
    assert_eq!(packet.prediction.as_ref().unwrap().tag, "greeting");
    assert!(packet.reply.starts_with("[es] "));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("Hola".to_string(), Language::Spanish, Language::English));
    assert_eq!(calls[1].1, Language::English);
    assert_eq!(calls[1].2, Language::Spanish);
}

#[tokio::test]
async fn test_translated_reply_keeps_extras() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let bot = seeded_bot().with_translator(Arc::new(MockTranslator::new(calls)));

    let reply = bot
        .respond("¿Cómo negocio mi salario?", Language::Spanish)
        .await;

    assert!(reply.starts_with("[es] "));
    assert!(reply.contains("\n\nExamples:\nQ: What are your salary expectations? - A: "));
}

#[tokio::test]
async fn test_translation_failure_becomes_fallback_reply() {
    let bot = seeded_bot().with_translator(Arc::new(FailingTranslator));

    let packet = bot.process("Bonjour", Language::French).await;

    assert!(packet.failed);
    assert!(packet.prediction.is_none());
    assert_eq!(
        packet.reply,
        format!("{} (Translation error: service unavailable)", FALLBACK_REPLY)
    );
}

#[tokio::test]
async fn test_english_ignores_failing_translator() {
    let bot = seeded_bot().with_translator(Arc::new(FailingTranslator));
    let reply = bot.respond("thank you", Language::English).await;
    assert!(!reply.starts_with(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_same_seed_gives_same_conversation() {
    let first = seeded_bot();
    let second = seeded_bot();
    for input in ["hello", "what is the STAR method?", "bye"] {
        assert_eq!(
            first.respond(input, Language::English).await,
            second.respond(input, Language::English).await
        );
    }
}

#[tokio::test]
async fn test_conversation_log_records_turns() {
    let bot = seeded_bot();
    let mut log = ChatLog::new();

    for input in ["hi", "how do I prepare for a technical interview?"] {
        log.push_user(input);
        let reply = bot.respond(input, Language::English).await;
        log.push_bot(reply);
    }

    assert_eq!(log.entries().len(), 4);
    let transcript = log.render_transcript();
    assert!(transcript.starts_with("You: hi\nBot: "));
    assert!(transcript.contains("You: how do I prepare for a technical interview?"));
    assert!(log.render_history().contains("You ("));
}

#[tokio::test]
async fn test_intent_without_responses_only_fails_its_own_turn() {
    let store = IntentStore::from_json(
        r#"[
            {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hello!"]},
            {"tag": "goodbye", "patterns": ["bye", "see you later"], "responses": ["Good luck!"]},
            {"tag": "todo", "patterns": ["add a task", "remind me tomorrow"], "responses": []}
        ]"#,
    )
    .unwrap();
    let bot = Chatbot::train(store, &Settings::default()).unwrap();

    assert_eq!(bot.respond("hello", Language::English).await, "Hello!");
    assert_eq!(bot.respond("bye", Language::English).await, "Good luck!");

    let packet = bot.process("add a task", Language::English).await;
    assert!(packet.failed);
    assert_eq!(packet.prediction.as_ref().unwrap().tag, "todo");
    assert_eq!(
        packet.reply,
        format!(
            "{} (Validation error: intent 'todo' has no responses)",
            FALLBACK_REPLY
        )
    );
}
