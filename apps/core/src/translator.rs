use crate::brain::Language;
use crate::error::AppError;
use async_trait::async_trait;

/// Defines the translation seam used around the chatbot.
///
/// User input is translated to English before classification and the reply
/// is translated back into the user's language. Implementations can wrap any
/// translation backend; the bot only depends on this trait.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translates `text` from `source` into `target`.
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AppError>;
}

/// Returns text unchanged. Used when no translation backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<String, AppError> {
        Ok(text.to_string())
    }
}
