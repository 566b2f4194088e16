//! Chatbot - Main orchestrator of a conversation turn.
//!
//! Trains the vectorizer and the classifier once from the intent store, then
//! answers each input with:
//! 1. Translation of the input to English (non-English users only)
//! 2. TF-IDF vectorization and tag prediction
//! 3. Intent lookup and response formatting
//! 4. Translation of the reply back to the user's language
//!
//! Any failure along the way becomes a fixed apology reply.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::classifier::{LogisticRegression, Prediction, TrainingOptions, DEFAULT_TOLERANCE};
use super::context_packet::{ContextPacket, Language};
use super::formatter::format_response;
use super::intents::IntentStore;
use super::vectorizer::TfidfVectorizer;
use crate::config::Settings;
use crate::error::AppError;
use crate::translator::{PassthroughTranslator, Translator};

/// Number of ranked tags kept in each turn record
pub const CANDIDATE_COUNT: usize = 3;

/// Reply used when a turn fails, followed by the error in parentheses
pub const FALLBACK_REPLY: &str = "I couldn't process your request. Please try again.";

/// Build the apology shown to the user for a failed turn
pub fn fallback_reply(err: &AppError) -> String {
    format!("{} ({})", FALLBACK_REPLY, err)
}

/// Trained intent-based chatbot
pub struct Chatbot {
    store: IntentStore,
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
    translator: Arc<dyn Translator>,
    rng: Mutex<StdRng>,
}

impl Chatbot {
    /// Train the classifier on every pattern of the store
    pub fn train(store: IntentStore, settings: &Settings) -> Result<Self, AppError> {
        let start = Instant::now();

        let pairs = store.training_pairs();
        let patterns: Vec<&str> = pairs.iter().map(|(pattern, _)| *pattern).collect();
        let labels: Vec<&str> = pairs.iter().map(|(_, tag)| *tag).collect();

        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&patterns)?;

        let options = TrainingOptions {
            c: settings.regularization,
            max_iter: settings.max_iter,
            tol: DEFAULT_TOLERANCE,
        };
        let model = LogisticRegression::fit(&rows, &labels, vectorizer.vocabulary_len(), &options)?;

        info!(
            "Chatbot trained on {} patterns, {} tags, {} words in {}ms",
            patterns.len(),
            model.classes().len(),
            vectorizer.vocabulary_len(),
            start.elapsed().as_millis()
        );

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            store,
            vectorizer,
            model,
            translator: Arc::new(PassthroughTranslator),
            rng: Mutex::new(rng),
        })
    }

    /// Replace the translation backend
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Predict the tag of an English text
    pub fn classify(&self, text: &str) -> Prediction {
        let row = self.vectorizer.transform(&text.to_lowercase());
        self.model.predict(&row)
    }

    /// Answer one user input; never fails, errors become the fallback reply
    pub async fn respond(&self, input: &str, language: Language) -> String {
        self.process(input, language).await.reply
    }

    /// Run a full turn and keep every intermediate result
    #[instrument(skip(self))]
    pub async fn process(&self, input: &str, language: Language) -> ContextPacket {
        let start = Instant::now();
        let mut packet = ContextPacket::new(input.to_string(), language);

        match self.answer(input, language, &mut packet).await {
            Ok(reply) => packet.reply = reply,
            Err(e) => {
                warn!("Turn failed: {}", e);
                packet.failed = true;
                packet.reply = fallback_reply(&e);
            }
        }

        packet.processing_time_ms = start.elapsed().as_millis() as u64;
        debug!("{}", packet.summary());
        packet
    }

    async fn answer(
        &self,
        input: &str,
        language: Language,
        packet: &mut ContextPacket,
    ) -> Result<String, AppError> {
        let english = if language == Language::English {
            input.to_string()
        } else {
            self.translator
                .translate(input, language, Language::English)
                .await?
        };
        packet.english_query = english.clone();

        let prediction = self.classify(&english);
        let tag = prediction.tag.clone();
        packet.candidates = prediction
            .top_k(CANDIDATE_COUNT)
            .into_iter()
            .map(|(tag, p)| (tag.to_string(), p))
            .collect();
        packet.prediction = Some(prediction);

        let intent = self
            .store
            .find(&tag)
            .ok_or_else(|| AppError::Internal(format!("predicted unknown tag '{}'", tag)))?;

        let reply = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| AppError::Internal(format!("rng lock poisoned: {}", e)))?;
            format_response(intent, &mut *rng)?
        };

        if language == Language::English {
            Ok(reply)
        } else {
            self.translator
                .translate(&reply, Language::English, language)
                .await
        }
    }

    /// Share of training patterns the model labels with their own tag
    pub fn training_accuracy(&self) -> f64 {
        let pairs = self.store.training_pairs();
        if pairs.is_empty() {
            return 0.0;
        }
        let correct = pairs
            .iter()
            .filter(|(pattern, tag)| self.classify(pattern).tag == *tag)
            .count();
        correct as f64 / pairs.len() as f64
    }

    #[cfg(test)]
    pub fn store(&self) -> &IntentStore {
        &self.store
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }
}
